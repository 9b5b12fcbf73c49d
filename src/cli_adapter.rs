use chrono::Local;
use program_copier::application::copy_and_rename::CopyOutcome;
use program_copier::application::service::{CopyReport, ProgramCopyService};
use program_copier::ports::command_handler::{Command, CommandError, CommandHandler};
use tracing::instrument;

pub struct CliAdapter {
    service: ProgramCopyService,
    default_program: String,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("default_program", &self.default_program)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(service: ProgramCopyService, default_program: impl Into<String>) -> Self {
        Self {
            service,
            default_program: default_program.into(),
        }
    }

    /// `args[0]` is the binary name, as in `std::env::args()`.
    pub fn parse_args(args: &[String]) -> Result<Command, CommandError> {
        match args.get(1).map(|s| s.as_str()) {
            None | Some("copy") => match args.get(2..).unwrap_or_default() {
                [] => Ok(Command::CopyProgram { program: None }),
                [program] => Ok(Command::CopyProgram {
                    program: Some(program.clone()),
                }),
                _ => Err(CommandError::InvalidCommand {
                    details: "copy takes at most one program name".to_string(),
                }),
            },
            Some("clients") => Ok(Command::ListClients),
            Some("templates") => Ok(Command::ListTemplates),
            Some(other) => Err(CommandError::InvalidCommand {
                details: format!(
                    "unknown command '{}', expected one of: copy [program], clients, templates",
                    other
                ),
            }),
        }
    }
}

pub fn render_copy_report(report: &CopyReport) -> String {
    let mut output = format!(
        "\nCopied program '{}' from {}:\n",
        report.template.program_name, report.template.source
    );

    for client in &report.outcomes {
        match &client.outcome {
            CopyOutcome::Copied {
                title,
                renamed: true,
                ..
            } => output.push_str(&format!(
                "✅ {}: \"{}\"\n",
                client.client.client_name, title
            )),
            CopyOutcome::Copied { sheet_id, title, .. } => output.push_str(&format!(
                "⚠️ {}: copied as sheet {} but not renamed to \"{}\"\n",
                client.client.client_name, sheet_id, title
            )),
            CopyOutcome::Skipped { reason } => output.push_str(&format!(
                "❌ {}: {}\n",
                client.client.client_name, reason
            )),
        }
    }

    output.push_str(&format!(
        "\nSummary: {} copied, {} skipped",
        report.copied_count(),
        report.skipped_count()
    ));
    output
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::CopyProgram { program } => {
                let program = program.unwrap_or_else(|| self.default_program.clone());
                let report = self
                    .service
                    .copy_program(&program, Local::now().date_naive())
                    .await
                    .map_err(|e| CommandError::ExecutionFailed {
                        details: format!("Failed to copy program {}: {:?}", program, e),
                    })?;

                Ok(render_copy_report(&report))
            }
            Command::ListClients => {
                let clients = self.service.list_clients().await.map_err(|e| {
                    CommandError::ExecutionFailed {
                        details: format!("Failed to list clients: {:?}", e),
                    }
                })?;

                Ok(clients
                    .iter()
                    .map(|client| format!("{}\t{}", client.client_name, client.spreadsheet_id))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::ListTemplates => {
                let templates = self.service.list_templates().await.map_err(|e| {
                    CommandError::ExecutionFailed {
                        details: format!("Failed to list templates: {:?}", e),
                    }
                })?;

                Ok(templates
                    .iter()
                    .map(|template| {
                        format!(
                            "{}\t{}\t{}",
                            template.program_name,
                            template.source.spreadsheet_id,
                            template.source.sheet_id
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}
