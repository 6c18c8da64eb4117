mod logging;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use game::App;
    use platform::{Window, WindowConfig};

    logging::init_logging();

    let mut app = App::new();
    let mut window = Window::create(WindowConfig::default(), &mut app)
        .context("could not open the main window")?;
    app.start().context("could not allocate the initial pixel buffer")?;

    game::run(&mut window, &mut app).context("frame loop aborted")?;
    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    logging::init_logging();

    log::error!("no window host for this platform");
    anyhow::bail!("this program needs the Win32 API")
}
