mod cli;
mod tracing_config;

fn main() {
    tracing_config::init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    let code = match command_line_interface.run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            2
        }
    };
    std::process::exit(code);
}
