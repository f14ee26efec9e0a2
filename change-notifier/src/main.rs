use clap::Parser;
use clap::error::ErrorKind;
use tokio_util::sync::CancellationToken;

use change_notifier::error::USAGE_STATUS;
use change_notifier::{Cli, ErrorReporter, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(USAGE_STATUS);
        }
    };

    logging::init();

    let config = cli.into_config();
    let reporter = ErrorReporter::new(&config.notification_dir);

    if let Err(err) = run(&config, CancellationToken::new()).await {
        reporter.fail(&err);
    }
}
