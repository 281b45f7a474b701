fn main() {
    if let Err(err) = insight_metrics::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
