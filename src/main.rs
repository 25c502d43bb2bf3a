use guidedog_navigate::core::Region;
use guidedog_navigate::display::{Frame, HeadlessMap, RecordedFit};
use guidedog_navigate::provider::{MockLocationProvider, MockScript};
use guidedog_navigate::{ConfigurationManager, NavigationScreen, ScreenConfig};
use serde::Serialize;
use smol::{LocalExecutor, Timer};
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Final state printed as JSON
#[derive(Serialize)]
struct Report<'a> {
    frame: Option<&'a Frame>,
    camera: Option<&'a Region>,
    fits: &'a [RecordedFit],
    path_points: usize,
}

struct Args {
    track_path: String,
    destination: Option<String>,
    config_path: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if arg == "--config" {
            config_path = Some(rest.next()?.clone());
        } else {
            positional.push(arg.clone());
        }
    }

    let mut positional = positional.into_iter();
    let track_path = positional.next()?;
    let destination = positional.next();
    if positional.next().is_some() {
        return None;
    }

    Some(Args {
        track_path,
        destination,
        config_path,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run ready tasks, then apply what they produced
fn settle(executor: &LocalExecutor<'_>, screen: &mut NavigationScreen<'_, '_, HeadlessMap>) {
    while executor.try_tick() {}
    screen.process();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args) else {
        let program = args.first().map_or("guidedog", |s| s.as_str());
        eprintln!("Usage: {} <track_json> [\"lat, lng\"] [--config <config_json>]", program);
        return Err("Invalid arguments".into());
    };

    let config = match &args.config_path {
        Some(path) => ConfigurationManager::from_file(path)?.get_config().clone(),
        None => ScreenConfig::default(),
    };

    let track_data = std::fs::read_to_string(&args.track_path)?;
    let script: MockScript = serde_json::from_str(&track_data)?;
    info!(
        track = %args.track_path,
        fixes = script.fixes.len(),
        "loaded track"
    );

    let executor = LocalExecutor::new();
    let provider = Rc::new(MockLocationProvider::from_script(&script));
    let mut screen = NavigationScreen::mount(
        &executor,
        Rc::clone(&provider),
        HeadlessMap::new(config.viewport),
        config.clone(),
    );
    settle(&executor, &mut screen);

    for fix in &script.fixes {
        if !provider.push_fix(*fix) {
            break;
        }
        settle(&executor, &mut screen);
    }

    if let Some(destination) = &args.destination {
        screen.set_input(destination.as_str());
        if screen.submit() {
            let wait = config.fit.delay() + Duration::from_millis(50);
            smol::block_on(executor.run(Timer::after(wait)));
            settle(&executor, &mut screen);
        }
    }

    let report = Report {
        frame: screen.display().last_frame(),
        camera: screen.display().camera(),
        fits: screen.display().fits(),
        path_points: screen.model().path().len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    screen.unmount();
    settle(&executor, &mut screen);
    Ok(())
}
