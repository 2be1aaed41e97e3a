use std::process::ExitCode;

use ts_typegen::cli::CommandLineInterface;

fn main() -> anyhow::Result<ExitCode> {
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.run()
}
