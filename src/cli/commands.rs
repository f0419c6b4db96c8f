use std::time::Duration;

use crate::flow::flow_model::{ComponentSpec, FlowSpec, FlowStep};
use crate::flow::runner::FlowRunner;
use crate::session::http::HttpDriver;
use crate::session::remote::RemoteDriver;
use crate::session::scripted::ScriptedDriver;
use crate::session::session::{Session, SessionConfig};

// ============================================================================
// run subcommand
// ============================================================================

/// Run one flow file and return whether it passed.
#[allow(clippy::too_many_arguments)]
pub fn cmd_run(
    flow_path: &str,
    driver_name: &str,
    bridge: Option<&str>,
    bridge_args: &[String],
    endpoint: Option<&str>,
    await_timeout_secs: u64,
    scroll_timeout_secs: u64,
    trace: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let flow = load_flow(flow_path)?;

    let config = SessionConfig {
        await_timeout: Duration::from_secs(await_timeout_secs),
        scroll_timeout: Duration::from_secs(scroll_timeout_secs),
        ..SessionConfig::default()
    };

    let mut session = match driver_name {
        "scripted" => {
            // Dry run: every declared identifier is treated as on
            // screen, which exercises flow logic without a device.
            let driver = ScriptedDriver::new();
            seed_from_flow(&driver, &flow);
            Session::new(Box::new(driver))
        }
        "remote" => {
            let command = bridge.ok_or("the remote driver requires --bridge")?;
            Session::new(Box::new(RemoteDriver::spawn(command, bridge_args)?))
        }
        "http" => {
            let base_url = endpoint.ok_or("the http driver requires --endpoint")?;
            Session::new(Box::new(HttpDriver::new(base_url)?))
        }
        other => return Err(format!("unknown driver '{}'", other).into()),
    };
    session = session.with_config(config);
    if let Some(path) = trace {
        session = session.with_trace(path);
    }

    session.launch()?;
    let result = FlowRunner::run(&flow, &mut session);

    if result.passed {
        println!("PASS {} ({} steps)", result.flow_name, result.steps_run);
    } else {
        println!(
            "FAIL {} at step {}: {}",
            result.flow_name,
            result.steps_run,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(result.passed)
}

// ============================================================================
// check subcommand
// ============================================================================

/// Parse a flow file and report what it declares.
pub fn cmd_check(flow_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let flow = load_flow(flow_path)?;
    println!(
        "{}: {} screens, {} steps",
        flow.name,
        flow.screens.len(),
        flow.steps.len()
    );
    for screen in &flow.screens {
        println!(
            "  [{}] {} ({} components)",
            screen.name,
            screen.identifier,
            screen.components.len()
        );
    }
    Ok(())
}

fn load_flow(path: &str) -> Result<FlowSpec, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let flow: FlowSpec = serde_yaml::from_str(&text)?;
    Ok(flow)
}

/// Seed a scripted driver so every identifier a flow can reference is
/// already on screen: screen markers, static components, scroll
/// containers, resolved dynamic targets, and the declared tab bar.
fn seed_from_flow(driver: &ScriptedDriver, flow: &FlowSpec) {
    let mut tabs: Vec<(Option<usize>, String)> = Vec::new();

    for screen in &flow.screens {
        driver.show(&screen.identifier);
        for component in &screen.components {
            match component {
                ComponentSpec::Static { id, .. } | ComponentSpec::Scroll { id, .. } => {
                    driver.show(id)
                }
                ComponentSpec::Tab { name, index, .. } => {
                    tabs.push((*index, name.clone()));
                }
                ComponentSpec::Dynamic { .. } => {}
            }
        }
    }

    // Dynamic components only have concrete identifiers per step value.
    for step in &flow.steps {
        let resolved = match step {
            FlowStep::Navigate {
                from,
                tap,
                value: Some(value),
                ..
            } => flow
                .screen(from)
                .and_then(|s| s.registry().resolve_dynamic(tap, value)),
            FlowStep::ScrollTo {
                screen,
                target,
                value: Some(value),
                ..
            } => flow
                .screen(screen)
                .and_then(|s| s.registry().resolve_dynamic(target, value)),
            _ => None,
        };
        if let Some(id) = resolved {
            driver.show(id);
        }
    }

    tabs.sort_by_key(|(index, _)| index.unwrap_or(usize::MAX));
    let names: Vec<&str> = tabs.iter().map(|(_, name)| name.as_str()).collect();
    if !names.is_empty() {
        driver.tabs(&names);
    }
}
