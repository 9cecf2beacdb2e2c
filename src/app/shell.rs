// This file is part of Hemopicker.
// Copyright (C) 2025 virtuNat and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Window-level loop: screen registry, input pump, exit signal handling,
//! teardown and the frame limiter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bevy::ecs::schedule::ExecutorKind;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use bevy::window::{PrimaryWindow, WindowCloseRequested};
use bevy::prelude::*;

use super::state::{OnShutdown, Screen};
use crate::core::config::{Scheduling, ShellConfig};
use crate::core::system::system_order::ShellPhase;
use crate::interaction::inputmap::types::Action;

/// Input as seen by screens, already resolved to window pixels and actions.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ShellInput {
    /// Cursor position in window pixels, top-left origin.
    MouseDown { button: MouseButton, pos: Vec2 },
    MouseUp { button: MouseButton },
    Action(Action),
    ActionReleased(Action),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    WindowClosed,
    Cancelled,
    AutoClose,
    Failure(String),
}

impl ExitReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExitReason::Failure(_))
    }

    pub fn app_exit(&self) -> AppExit {
        if self.is_failure() { AppExit::from_code(1) } else { AppExit::Success }
    }
}

/// Ends the loop after the current tick. Any system may raise it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ExitSignal(pub ExitReason);

/// Screens by name, filled while plugins build.
#[derive(Resource, Debug, Default)]
pub struct ScreenRegistry {
    screens: Vec<(String, Screen)>,
}

impl ScreenRegistry {
    pub fn register(&mut self, name: impl Into<String>, screen: Screen) {
        let name = name.into();
        match self.screens.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = screen,
            None => self.screens.push((name, screen)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Screen> {
        self.screens.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.iter().map(|(n, _)| n.as_str())
    }
}

pub trait RegisterScreen {
    fn register_screen(&mut self, name: &str, screen: Screen) -> &mut Self;
}

impl RegisterScreen for App {
    fn register_screen(&mut self, name: &str, screen: Screen) -> &mut Self {
        if !self.world().contains_resource::<ScreenRegistry>() {
            self.init_resource::<ScreenRegistry>();
        }
        self.world_mut().resource_mut::<ScreenRegistry>().register(name, screen);
        self
    }
}

/// Once-only guard shared by the exit settle and the panic path in `main`.
/// It owns no resources; window and clipboard handles are dropped with the
/// `App`. The latch only guarantees that teardown is reported once.
#[derive(Debug, Default)]
pub struct TeardownLatch {
    done: AtomicBool,
}

impl TeardownLatch {
    /// Returns false if teardown already happened.
    pub fn run(&self) -> bool {
        if self.done.swap(true, Ordering::SeqCst) {
            return false;
        }
        info!(target: "shell", "teardown");
        true
    }

    pub fn has_run(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Teardown(pub Arc<TeardownLatch>);

/// Fixed frame budget. `tick` returns how long to sleep so that frames are
/// at least `1 / fps_cap` apart.
#[derive(Resource, Debug, Clone)]
pub struct FrameClock {
    budget: Option<Duration>,
    last: Option<Instant>,
    pub frames: u64,
}

impl FrameClock {
    pub fn new(fps_cap: u32) -> Self {
        let budget = (fps_cap > 0).then(|| Duration::from_secs_f64(1.0 / fps_cap as f64));
        Self { budget, last: None, frames: 0 }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn tick(&mut self, now: Instant) -> Duration {
        self.frames += 1;
        let wait = match (self.budget, self.last) {
            (Some(budget), Some(last)) => budget.saturating_sub(now.saturating_duration_since(last)),
            _ => Duration::ZERO,
        };
        self.last = Some(now + wait);
        wait
    }
}

/// Side effects raised while handling events. Cooperative scheduling runs
/// them on the async compute pool and joins them in [`ShellPhase::Settle`];
/// synchronous scheduling runs them in place.
#[derive(Resource, Default)]
pub struct PendingTasks {
    cooperative: bool,
    tasks: Vec<Task<()>>,
}

impl PendingTasks {
    pub fn new(scheduling: Scheduling) -> Self {
        Self { cooperative: scheduling == Scheduling::Cooperative, tasks: Vec::new() }
    }

    pub fn submit(&mut self, job: impl FnOnce() + Send + 'static) {
        match AsyncComputeTaskPool::try_get() {
            Some(pool) if self.cooperative => self.tasks.push(pool.spawn(async move { job() })),
            _ => job(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Why the loop is ending, once an exit signal has been settled.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ShellStatus {
    pub exit: Option<ExitReason>,
}

pub struct ShellPlugin {
    pub shell: ShellConfig,
}

impl Plugin for ShellPlugin {
    fn build(&self, app: &mut App) {
        let executor = match self.shell.scheduling {
            Scheduling::Synchronous => ExecutorKind::SingleThreaded,
            Scheduling::Cooperative => ExecutorKind::MultiThreaded,
        };
        app.add_event::<ShellInput>()
            .add_event::<ExitSignal>()
            .add_event::<WindowCloseRequested>()
            .add_event::<MouseButtonInput>()
            .insert_resource(self.shell.clone())
            .insert_resource(FrameClock::new(self.shell.fps_cap))
            .insert_resource(PendingTasks::new(self.shell.scheduling))
            .init_resource::<Teardown>()
            .init_resource::<ShellStatus>()
            .init_resource::<ScreenRegistry>()
            .init_state::<Screen>()
            .configure_sets(
                Update,
                (ShellPhase::Pump, ShellPhase::Events, ShellPhase::Logic, ShellPhase::Settle, ShellPhase::Display)
                    .chain(),
            )
            .add_systems(Startup, enter_initial_screen)
            .add_systems(
                Update,
                (
                    (intercept_close, pump_mouse).in_set(ShellPhase::Pump),
                    consume_shell_input.in_set(ShellPhase::Logic),
                    join_pending_tasks.in_set(ShellPhase::Settle),
                ),
            )
            .add_systems(Last, (settle_exit, limit_frame_rate).chain())
            .edit_schedule(Update, |schedule| {
                schedule.set_executor_kind(executor);
            });
        info!(target: "shell", scheduling = ?self.shell.scheduling, fps_cap = self.shell.fps_cap, "shell configured");
    }
}

fn enter_initial_screen(
    shell: Res<ShellConfig>,
    registry: Res<ScreenRegistry>,
    mut next: ResMut<NextState<Screen>>,
    mut exit: EventWriter<ExitSignal>,
) {
    let name = shell.initial_state.trim();
    match registry.get(name) {
        Some(screen) => {
            info!(target: "shell", "initial screen '{name}'");
            next.set(screen);
        }
        None => {
            let known: Vec<&str> = registry.names().collect();
            error!(target: "shell", "unknown initial screen '{name}' (registered: {known:?})");
            exit.write(ExitSignal(ExitReason::Failure(format!("application state {name} is not defined"))));
        }
    }
}

fn intercept_close(mut closes: EventReader<WindowCloseRequested>, mut exit: EventWriter<ExitSignal>) {
    if closes.read().count() > 0 {
        exit.write(ExitSignal(ExitReason::WindowClosed));
    }
}

fn pump_mouse(
    mut buttons: EventReader<MouseButtonInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut out: EventWriter<ShellInput>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    for ev in buttons.read() {
        match ev.state {
            ButtonState::Pressed => {
                // Presses outside the window have nothing to hit.
                if let Some(pos) = cursor {
                    out.write(ShellInput::MouseDown { button: ev.button, pos });
                }
            }
            ButtonState::Released => {
                out.write(ShellInput::MouseUp { button: ev.button });
            }
        }
    }
}

/// Input belongs to the tick it was pumped in; a screen entered later must not replay it.
fn consume_shell_input(mut events: ResMut<Events<ShellInput>>) {
    events.clear();
}

fn join_pending_tasks(mut pending: ResMut<PendingTasks>) {
    if pending.tasks.is_empty() {
        return;
    }
    let count = pending.tasks.len();
    for task in pending.tasks.drain(..) {
        block_on(task);
    }
    debug!(target: "shell", "joined {count} task(s)");
}

/// Exit hook of the current screen, then teardown, then `AppExit`.
fn settle_exit(world: &mut World) {
    let signals: Vec<ExitSignal> = match world.get_resource_mut::<Events<ExitSignal>>() {
        Some(mut events) => events.drain().collect(),
        None => return,
    };
    if signals.is_empty() || world.resource::<ShellStatus>().exit.is_some() {
        return;
    }
    let reason = signals
        .iter()
        .find(|s| s.0.is_failure())
        .unwrap_or(&signals[0])
        .0
        .clone();
    info!(target: "shell", ?reason, "exit signal");

    if let Some(screen) = world.get_resource::<State<Screen>>().map(|s| *s.get()) {
        if world.try_run_schedule(OnShutdown(screen)).is_err() {
            debug!(target: "shell", "no exit hook for {screen:?}");
        }
    }
    if let Some(teardown) = world.get_resource::<Teardown>().cloned() {
        teardown.0.run();
    }
    if let ExitReason::Failure(msg) = &reason {
        error!(target: "shell", "{msg}");
    }
    world.send_event(reason.app_exit());
    world.resource_mut::<ShellStatus>().exit = Some(reason);
}

fn limit_frame_rate(mut clock: ResMut<FrameClock>) {
    let wait = clock.tick(Instant::now());
    if !wait.is_zero() {
        std::thread::sleep(wait);
    }
}
