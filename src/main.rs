mod blocks;
mod clients;
mod config;
mod data;
mod icons;
mod logging;
mod markup;
mod niri;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    blocks::entry_point()
        .await
        .inspect_err(|err| log::error!("{err}"))
}
