use std::process::ExitCode;

fn main() -> ExitCode {
    vans_reporter_lib::run()
}
