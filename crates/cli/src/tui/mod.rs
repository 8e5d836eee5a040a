mod app;
mod event;
mod theme;
mod views;
mod widgets;

pub fn run(config: &formbench_core::Config) -> anyhow::Result<()> {
  app::run(config)
}
