//! Command implementations
//!
//! Generic over the GPIO driver so the same code runs against hardware
//! and the simulator.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use rpgpio_core::{describe, GpioHandle, NotFoundError, PinHeaderEntry, PinTable};
use rpgpio_hal::{Direction, GpioDriver, NumberingScheme, PullMode};

/// Width of the label column in `list` output
const LABEL_COLUMN: usize = 20;

/// How a pin argument on the command line is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinSelector {
    Physical(u32),
    Bcm(u32),
}

impl PinSelector {
    pub fn new(pin: u32, bcm: bool) -> Self {
        if bcm {
            PinSelector::Bcm(pin)
        } else {
            PinSelector::Physical(pin)
        }
    }

    pub fn resolve(self, table: &PinTable) -> Result<&'static PinHeaderEntry, NotFoundError> {
        match self {
            PinSelector::Physical(pos) => table.lookup_by_physical_position(pos),
            PinSelector::Bcm(id) => table.lookup_by_logical_id(id),
        }
    }
}

/// The driver and pin table every command works on
pub struct Board<'d, D: GpioDriver> {
    pub driver: &'d D,
    pub table: PinTable,
    pub numbering: NumberingScheme,
}

impl<'d, D: GpioDriver> Board<'d, D> {
    fn handle(&self, pin: PinSelector) -> Result<(&'static PinHeaderEntry, GpioHandle<'d, D>)> {
        let entry = pin.resolve(&self.table)?;
        debug!("Resolved {:?} to {}", pin, entry.name());
        Ok((entry, GpioHandle::for_entry(self.driver, entry, self.numbering)))
    }
}

/// One line per table entry, with busy status when probing
pub fn list_lines<D: GpioDriver>(ctx: &Board<'_, D>, probe: bool) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(ctx.table.len());

    for entry in ctx.table {
        let label = describe(entry);
        let line = if probe {
            let mut handle = GpioHandle::for_entry(ctx.driver, entry, ctx.numbering);
            let busy = handle
                .probe_busy()
                .with_context(|| format!("probing {}", entry.name()))?;
            let status = if busy { "busy".red() } else { "free".green() };
            format!("{:width$} {}", label.as_str(), status, width = LABEL_COLUMN)
        } else {
            label.as_str().to_string()
        };
        lines.push(line);
    }

    Ok(lines)
}

/// Print the header table
pub fn list<D: GpioDriver>(ctx: &Board<'_, D>, probe: bool) -> Result<()> {
    for line in list_lines(ctx, probe)? {
        println!("{}", line);
    }
    Ok(())
}

/// Print every rendering of one pin
pub fn show<D: GpioDriver>(ctx: &Board<'_, D>, pin: PinSelector) -> Result<()> {
    let entry = pin.resolve(&ctx.table)?;
    println!("{}", entry.name().as_str().bold());
    println!("  label:     {}", describe(entry).as_str());
    println!("  driver id: {}", entry.address(ctx.numbering));
    println!("  rich:      {}", entry.rich());
    Ok(())
}

/// Claim a pin as input and print its level
pub fn read<D: GpioDriver>(
    ctx: &Board<'_, D>,
    pin: PinSelector,
    pull: PullMode,
) -> Result<i32> {
    let (entry, mut handle) = ctx.handle(pin)?;
    handle
        .configure(Direction::Input, pull)
        .with_context(|| format!("configuring {} as input", entry.name()))?;

    let level = handle.read();
    handle.release()?;
    let level = level.with_context(|| format!("reading {}", entry.name()))?;

    println!("{}", level.as_int());
    Ok(level.as_int())
}

/// Claim a pin as output, drive it, and optionally hold the level
pub fn write<D: GpioDriver>(
    ctx: &Board<'_, D>,
    pin: PinSelector,
    level: i32,
    hold: Duration,
) -> Result<()> {
    let (entry, mut handle) = ctx.handle(pin)?;
    handle
        .configure(Direction::Output, PullMode::Off)
        .with_context(|| format!("configuring {} as output", entry.name()))?;
    if let Err(e) = handle.write(level) {
        handle.release()?;
        return Err(e).with_context(|| format!("writing {}", entry.name()));
    }
    info!("{} set to {}", entry.name(), if level != 0 { 1 } else { 0 });

    if !hold.is_zero() {
        thread::sleep(hold);
    }
    handle.release()?;
    Ok(())
}

/// Run PWM on a pin for a while
pub fn pwm<D: GpioDriver>(
    ctx: &Board<'_, D>,
    pin: PinSelector,
    frequency_hz: f32,
    duty_percent: f32,
    duration: Duration,
) -> Result<()> {
    let (entry, mut handle) = ctx.handle(pin)?;
    handle
        .configure(Direction::Output, PullMode::Off)
        .with_context(|| format!("configuring {} as output", entry.name()))?;

    let started = handle
        .start_pwm_with_duty(frequency_hz, duty_percent)
        .with_context(|| format!("starting PWM on {}", entry.name()));
    if let Err(e) = started {
        handle.release()?;
        return Err(e);
    }
    info!(
        "{}: PWM {} Hz at {}% for {:?}",
        entry.name(),
        frequency_hz,
        duty_percent,
        duration
    );

    thread::sleep(duration);
    handle.release()?;
    Ok(())
}
