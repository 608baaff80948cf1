use clap::Subcommand;
use clap_handler::Handler;

mod start;

#[derive(Subcommand, Clone, Handler)]
pub enum ZapCommand {
    Start(start::StartCommand),
}
