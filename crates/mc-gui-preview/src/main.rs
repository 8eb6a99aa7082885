mod assemble;
mod config;
mod error;
mod snapshot;

use std::rc::Rc;

use bytes::Bytes;
use mc_gui_builder::MaterialRegistry;
use mc_gui_core::viewer::VIEWER_INVENTORY_SIZE;
use mc_gui_core::{ClickEvent, ViewerId};
use mc_gui_net::{NetError, PacketAdapter, PacketSink};
use tracing::{debug, error, info, warn};

use config::PreviewConfig;
use error::PreviewError;
use snapshot::Snapshot;

/// Sink that logs every packet instead of sending it.
#[derive(Debug, Default)]
struct LoggingSink {
    sent: usize,
}

impl PacketSink for LoggingSink {
    fn send(&mut self, viewer: ViewerId, packet: Bytes) -> Result<(), NetError> {
        self.sent += 1;
        debug!(
            "-> {viewer}: packet 0x{:02X} ({} bytes)",
            packet.first().copied().unwrap_or_default(),
            packet.len()
        );
        Ok(())
    }
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "gui.toml".into());
    let config = match PreviewConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &PreviewConfig) -> Result<(), PreviewError> {
    let registry = MaterialRegistry::builtin()?;
    let mut gui = assemble::build_gui(&config.gui, &registry)?;
    info!(
        "Previewing {} '{}' ({} top slots)",
        gui.kind(),
        gui.title(),
        gui.top_size()
    );

    gui.on_outside_click(Some(Rc::new(|event: &mut ClickEvent| {
        info!("{} clicked outside the window", event.viewer);
    })));
    gui.on_close(Some(Rc::new(|viewer: ViewerId| {
        info!("{viewer} closed the gui");
    })));

    let viewer = ViewerId(config.viewer.id);
    let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
    let mut adapter = PacketAdapter::new(LoggingSink::default(), config.gui.position);

    gui.show(&mut adapter, viewer, &mut inventory)?;
    if let (Some(anvil), Some(view)) = (gui.anvil(), gui.view()) {
        adapter.set_repair_cost(view, viewer, anvil.cost())?;
    }

    for click in &config.clicks {
        let action = assemble::click_action(click, &registry)?;
        let mut event = ClickEvent::new(click.slot, action, viewer);
        match gui.handle_click(&mut adapter, &mut event) {
            Ok(outcome) if outcome.applied => info!(
                "Click on slot {} applied, previous: {:?}",
                click.slot,
                outcome.previous.map(|i| i.runtime_id)
            ),
            Ok(_) => info!("Click on slot {} not applied", click.slot),
            Err(e) => warn!("Click on slot {} rejected: {e}", click.slot),
        }
    }

    gui.show(&mut adapter, viewer, &mut inventory)?;
    let snapshot = Snapshot::capture(&gui, adapter.sink().sent);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    gui.close(&mut adapter, viewer, &mut inventory)?;
    Ok(())
}
