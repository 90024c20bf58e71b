mod command;
mod profile;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
