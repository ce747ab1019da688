/// A note pad that numbers your tasks
#[derive(argh::FromArgs)]
#[argh(help_triggers("-h", "--help"))]
pub struct Args {
    /// options `error`, `warn`, `info`, `debug` or `trace`
    #[argh(option, long = "log-level")]
    pub log_level: Option<String>,
    /// tail log file
    #[argh(switch, long = "log")]
    pub log: bool,
    /// initialize default config
    #[argh(switch, long = "init")]
    pub init: bool,
    /// overwrite existing config
    #[argh(switch, long = "overwrite")]
    pub overwrite: bool,
}

pub fn parse() -> Args {
    argh::from_env()
}
