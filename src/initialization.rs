use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::General;
use crate::errors::InitError;
use crate::manager_meteo::OpenMeteo;
use crate::manager_places::Photon;

/// Log line pattern shared by all appenders
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Bundle of the managers the tool talks to
pub struct Mgr {
    pub meteo: OpenMeteo,
    pub places: Photon,
}

/// Sets up logging and returns the manager bundle
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn init(general: &General) -> Result<Mgr, InitError> {
    setup_logging(general)?;

    Ok(Mgr {
        meteo: OpenMeteo::new(),
        places: Photon::new(),
    })
}

/// Configures log4rs with a console and/or file appender according to
/// the configuration. With neither configured, logging stays off and
/// the report alone goes to the terminal.
///
/// # Arguments
///
/// * 'general' - the general configuration section
fn setup_logging(general: &General) -> Result<(), InitError> {
    let mut builder = log4rs::Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if !general.log_path.is_empty() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&general.log_path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(config)?;

    Ok(())
}
