use std::error::Error;
use std::path::PathBuf;

use log::{info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use zonectl::mock::{MockConnector, MockDevice, MockDeviceBuilder, MockScanner};
use zonectl::{bootstrap, settings, DeviceInfo, TransportOp};

/// Walks the core through a full session against mock speakers: bootstrap,
/// scan if the cache is empty, select, volume, transport, queue playback.
/// The real device-protocol adapter plugs into the same two traits the
/// mocks implement.
fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let db_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("zonectl-demo.sqlite"));
    info!("using store at {}", db_path.display());

    let startup = bootstrap(&db_path, demo_discovery(), demo_connector())?;
    let mut controller = startup.controller;

    match &startup.window_geometry {
        Some(geometry) => info!("restoring window geometry {}", geometry),
        None => info!("no saved window geometry"),
    }

    if startup.needs_scan {
        info!("no cached speakers, scanning the network");
        let found = controller.scan()?;
        info!("scan found {} speaker(s)", found);
    }

    for record in controller.devices() {
        info!("known speaker: {} ({})", record.display_name, record.network_address);
    }

    if controller.selected_uid().is_none() {
        let first = controller.devices().next().map(|record| record.uid.clone());
        match first {
            Some(uid) => controller.select(Some(uid.as_str()))?,
            None => {
                warn!("no speakers available, nothing to control");
                return Ok(());
            }
        }
    }

    let playing = controller.now_playing();
    info!(
        "now playing on {}: {} / {} (volume {:?})",
        controller.selected_uid().unwrap_or("-"),
        playing.title,
        playing.artist,
        playing.volume,
    );

    controller.apply_volume(35)?;
    controller.transport(TransportOp::Play)?;

    let entries = controller.refresh_queue()?;
    info!("queue has {} entries", entries);
    for (index, entry) in controller.queue().iter().enumerate() {
        info!(
            "  {}. {} / {}",
            index + 1,
            entry.title.as_deref().unwrap_or("-"),
            entry.artist.as_deref().unwrap_or("-"),
        );
    }
    if entries > 0 {
        controller.play_queue_entry(0)?;
        info!("restarted queue from the top");
    }

    controller.set_setting(settings::WINDOW_GEOMETRY, "600x400+80+60")?;
    Ok(())
}

fn demo_discovery() -> MockScanner {
    let mut scanner = MockScanner::new();
    scanner.expect_list_addresses().returning(|| {
        Ok(vec![
            "192.168.1.140".to_string(),
            "192.168.1.141".to_string(),
            // bridge node, reports no identity and gets skipped by the scan
            "192.168.1.142".to_string(),
        ])
    });
    scanner
}

fn demo_connector() -> MockConnector {
    let mut connector = MockConnector::new();
    connector.expect_connect().returning(|address| {
        let device = match address {
            "192.168.1.140" => MockDeviceBuilder::new()
                .uid("RINCON_000E58C0123401400")
                .name("Kitchen")
                .volume(40)
                .track("Harvest Moon", "Neil Young")
                .queue_entry("Harvest Moon", "Neil Young")
                .queue_entry("Unknown Legend", "Neil Young")
                .build(),
            "192.168.1.141" => MockDeviceBuilder::new()
                .uid("RINCON_000E58C0567801400")
                .name("Den")
                .volume(25)
                .track("So What", "Miles Davis")
                .queue_entry("So What", "Miles Davis")
                .build(),
            _ => {
                let mut bridge = MockDevice::new();
                bridge.expect_info().returning(|| Ok(DeviceInfo::default()));
                bridge
            }
        };
        Box::new(device)
    });
    connector
}
