#[derive(serde::Deserialize, Debug, Clone)]
pub struct ProgramConfig {
    /// Program copied when none is given on the command line.
    pub name: Box<str>,
}
