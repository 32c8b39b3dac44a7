use std::process::ExitCode;
use track_map::{Settings, run, setup_logging};
use track_map_lib::ReqwestMapClient;

fn main() -> ExitCode {
    let settings = Settings::from_cli();
    setup_logging();

    let result = ReqwestMapClient::new(&settings.client_config())
        .and_then(|client| run(&settings, &client));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {e:?}");
            eprintln!("{}: {e}", env!("CARGO_BIN_NAME"));
            ExitCode::FAILURE
        }
    }
}
