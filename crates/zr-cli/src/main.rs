use zr_cli::{command, init_tracing, run};

fn main() {
    let matches = command().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(report) => println!("{report}"),
        Err(err) => {
            tracing::error!(error = %err, "reconciliation failed");
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
