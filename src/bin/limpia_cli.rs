use std::process::ExitCode;

fn main() -> ExitCode {
    limpia_core::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    ExitCode::from(limpia_core::cli::run(&args) as u8)
}
