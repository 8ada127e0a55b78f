use blog_cli::app;
use blog_common::logging::init_tracing;

fn main() {
    let matches = app::command().get_matches();
    init_tracing(&app::log_filter(&matches));

    std::process::exit(app::run(&matches));
}
