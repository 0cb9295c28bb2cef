mod commands;
mod output;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init_logging(&commands.config());
    run(commands).await
}

/// Scans when both a target and ports were given, prints usage otherwise.
async fn run(commands: CommandLine) -> anyhow::Result<()> {
    let cfg = commands.config();
    let scan_cfg = commands.scan_config();

    print::banner(cfg.no_banner);

    let (Some(target), Some(ports)) = (commands.target, commands.ports) else {
        CommandLine::print_usage()?;
        return Ok(());
    };

    print::header("starting scanner");
    scan::scan(target, ports.0, commands.output, scan_cfg, &cfg).await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn command_line(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    // A /7 is too large to expand, so reaching the scan path would fail.
    const OVERSIZED_BLOCK: &str = "10.0.0.0/7";

    #[tokio::test]
    async fn missing_ports_prints_usage_without_scanning() {
        let commands = command_line(&["tinyscan", "--no-banner", "-t", OVERSIZED_BLOCK]);
        assert!(run(commands).await.is_ok());
    }

    #[tokio::test]
    async fn missing_target_prints_usage_without_scanning() {
        let commands = command_line(&["tinyscan", "--no-banner", "-p", "80"]);
        assert!(run(commands).await.is_ok());
    }

    #[tokio::test]
    async fn no_arguments_prints_usage() {
        assert!(run(command_line(&["tinyscan", "--no-banner"])).await.is_ok());
    }

    #[tokio::test]
    async fn target_and_ports_reach_the_scan() {
        let commands = command_line(&[
            "tinyscan",
            "--no-banner",
            "-t",
            OVERSIZED_BLOCK,
            "-p",
            "80",
        ]);
        let err = run(commands).await.unwrap_err();
        assert!(err.to_string().contains(OVERSIZED_BLOCK));
    }
}
