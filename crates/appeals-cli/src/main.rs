use appeals_cli::{command, init_tracing, run, MapArgs};

#[tokio::main]
async fn main() {
    let matches = command().get_matches();
    let args = match MapArgs::from_matches(&matches) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    };
    init_tracing(args.verbose);

    match run(&args).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "mapping failed");
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
