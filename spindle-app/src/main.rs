//! Spindle - Terminal Virtual CD Player
//!
//! A skeuomorphic optical-disc player: arm a disc on the carousel, drag it
//! into the tray, watch it spin up.

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;

use spindle_core::{Player, SpindleMotor};
use spindle_input::{Command, InputHandler};
use spindle_library::{Config, ScanConfig, ScanProgress, Shelf, ShelfCache, ShelfScanner};
use spindle_tui::{
    App, CarouselWidget, ControlHit, ControlsWidget, HelpWidget, PaneAreas, StatusBarWidget,
    TrackListWidget, TrayWidget,
};

/// Frame rate for UI updates
const FPS: u64 = 30;

fn main() -> anyhow::Result<()> {
    // Logging goes to a file; the TUI owns the terminal
    if let Err(e) = init_logging() {
        eprintln!("logging disabled: {}", e);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run main event loop
    let result = run_app(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// Write tracing output to a log file under the user data directory
fn init_logging() -> anyhow::Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle");
    std::fs::create_dir_all(&log_dir)?;
    let file = File::create(log_dir.join("spindle.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("spindle_app=info,spindle_core=info,spindle_library=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("logging initialized");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    let mut app = App::new();
    let mut input_handler = InputHandler::new();
    let mut player = Player::new();
    let mut motor = SpindleMotor::new();

    // Load user config (last shelf folder, theme)
    let mut config = Config::load();
    if let Some(ref theme) = config.theme {
        app.state.set_theme(theme);
        app.state.clear_message();
    }

    // Initialize shelf cache and scanner
    let cache_path = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle")
        .join("shelf.db");
    let cache = ShelfCache::open(&cache_path).ok();
    let scanner = cache.map(ShelfScanner::new);

    // Load cached discs on startup if we have a last shelf folder,
    // otherwise fall back to the built-in demo shelf
    let mut shelf = Shelf::builtin();
    if config.last_shelf_folder.is_some() {
        if let Some(ref scanner) = scanner {
            if let Ok(discs) = scanner.get_all_discs() {
                if !discs.is_empty() {
                    shelf = Shelf::new(discs);
                }
            }
        }
    }
    let disc_count = shelf.len();
    app.state.set_shelf(shelf);

    // Track scan progress receiver and current scan folder for saving to config
    let mut scan_progress_rx: Option<crossbeam_channel::Receiver<ScanProgress>> = None;
    let mut current_scan_folder: Option<PathBuf> = None;

    let frame_duration = Duration::from_millis(1000 / FPS);
    let mut last_frame = Instant::now();

    app.state.set_message(format!(
        "Spindle - {} discs on the shelf | ? for help, :scan <folder> to add your own",
        disc_count
    ));

    loop {
        if app.should_quit {
            break;
        }

        // Process scan progress updates
        let mut scan_complete = false;
        if let Some(ref rx) = scan_progress_rx {
            while let Ok(progress) = rx.try_recv() {
                match progress {
                    ScanProgress::Started { total } => {
                        app.state.is_scanning = true;
                        app.state.scan_progress = (0, total);
                        app.state.set_message(format!("Scanning {} folders...", total));
                    }
                    ScanProgress::Found { current, total, .. }
                    | ScanProgress::Cached { current, total, .. } => {
                        app.state.scan_progress = (current, total);
                    }
                    ScanProgress::Complete { found, cached, failed } => {
                        app.state.is_scanning = false;
                        // Load the refreshed shelf from the scanner
                        if let Some(ref scanner) = scanner {
                            if let Ok(discs) = scanner.get_all_discs() {
                                if !discs.is_empty() {
                                    app.state.set_shelf(Shelf::new(discs));
                                }
                            }
                        }
                        // Save the scanned folder to config for next startup
                        if let Some(ref folder) = current_scan_folder {
                            config.last_shelf_folder = Some(folder.clone());
                            let _ = config.save(); // Best effort
                        }
                        current_scan_folder = None;
                        app.state.set_success(format!(
                            "Scan complete: {} new, {} cached, {} skipped",
                            found, cached, failed
                        ));
                        scan_complete = true;
                    }
                    ScanProgress::Error { .. } => {
                        // Logged by the scanner; keep going
                    }
                }
            }
        }
        if scan_complete {
            scan_progress_rx = None;
        }

        // Advance timed player state (eject window) and the platter
        let now = Instant::now();
        player.update(now);

        let snapshot = player.snapshot();
        if snapshot.is_ejecting {
            // Hard stop: the disc must not spin while the tray opens
            motor.halt();
        } else {
            motor.set_running(snapshot.spinning());
        }
        if motor.is_active() {
            motor.tick();
        }

        app.state
            .sync_player(snapshot, motor.angle(), player.eject_progress(now));
        app.state.frame_count = app.state.frame_count.wrapping_add(1);

        // Render
        terminal.draw(|frame| {
            render_ui(frame, &mut app);
        })?;

        // Handle input
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle quit shortcut
                    if key.code == KeyCode::Char('q')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.quit();
                        continue;
                    }

                    if let Some(cmd) = input_handler.handle_key(key) {
                        // Scans need the scanner and the progress channel
                        match &cmd {
                            Command::ShelfScan(path) => {
                                if let Some(ref scanner) = scanner {
                                    let scan_config = ScanConfig {
                                        directory: path.clone(),
                                        ..Default::default()
                                    };
                                    let (rx, _handle) = scanner.scan_async(scan_config);
                                    scan_progress_rx = Some(rx);
                                    current_scan_folder = Some(path.clone());
                                    app.state.is_scanning = true;
                                    app.state.set_message(format!(
                                        "Starting scan of {}...",
                                        path.display()
                                    ));
                                } else {
                                    app.state.set_error("Shelf cache not available");
                                }
                            }
                            _ => {
                                handle_command(&mut app, &mut player, &mut config, cmd);
                            }
                        }
                    }

                    // Update mode in app state
                    app.state.set_mode(input_handler.mode());
                    app.state.command_buffer = input_handler.command_buffer().to_string();
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, &mut player, mouse);
                }
                _ => {}
            }
        }

        // Maintain frame rate
        let elapsed = last_frame.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}

fn handle_command(app: &mut App, player: &mut Player, config: &mut Config, cmd: Command) {
    match cmd {
        // Transport
        Command::TogglePlay => {
            if player.has_disc() {
                player.toggle_play();
            } else {
                app.state.set_warning("No disc in the tray");
            }
        }
        Command::Eject => {
            if player.has_disc() {
                player.eject(Instant::now());
                app.state.set_message("Ejecting...");
            } else {
                app.state.set_warning("No disc to eject");
            }
        }
        Command::SkipForward => player.skip_forward(),
        Command::SkipBack => player.skip_back(),
        Command::SelectTrack(index) => player.select_track(index),

        // Carousel
        Command::CarouselNext => app.state.carousel.next(),
        Command::CarouselPrev => app.state.carousel.prev(),
        Command::SelectFocused => {
            let focused = app.state.carousel.focused_index();
            if let Some(disc) = app.state.shelf.get(focused).cloned() {
                player.select_disc(disc.id());
                app.state.set_message(format!(
                    "Armed: {} - drag it to the tray or press i",
                    disc.title()
                ));
            }
        }
        Command::InsertArmed => {
            // The keyboard path goes through the same drag guards as the
            // pointer: arm first, or nothing happens
            let armed = player.snapshot().armed;
            let disc = armed.and_then(|id| app.state.shelf.by_id(id).cloned());
            match disc {
                Some(disc) if player.begin_drag(disc.clone()) => {
                    if player.finish_drag(true) {
                        app.state.set_success(format!("Playing: {}", disc.title()));
                    } else {
                        app.state.set_warning("Tray is busy");
                    }
                }
                _ => app.state.set_warning("Nothing armed - select a disc first"),
            }
        }

        // Knobs
        Command::AdjustVolume(delta) => player.adjust_volume(delta),
        Command::AdjustBass(delta) => player.adjust_bass(delta),

        // UI
        Command::SetTheme(name) => {
            if app.state.set_theme(&name) {
                config.theme = Some(app.state.theme.name.to_string());
                let _ = config.save(); // Best effort
            }
        }
        Command::ToggleHelp => app.state.toggle_help(),
        Command::HelpScrollUp => app.state.help_scroll_up(),
        Command::HelpScrollDown => app.state.help_scroll_down(),

        // Mode changes are reflected via the input handler afterwards
        Command::EnterCommandMode | Command::EnterNormalMode => {}

        Command::ExecuteCommand(input) => {
            app.state.set_error(format!("Unknown command: {}", input));
        }

        Command::Quit => app.quit(),
        Command::Cancel => {
            player.cancel_drag();
            app.state.drag_pos = None;
            app.state.clear_message();
        }

        // Handled in the event loop (needs the scanner)
        Command::ShelfScan(_) => {}
    }
}

fn handle_mouse(app: &mut App, player: &mut Player, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);
    let areas = app.state.areas;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Carousel: click arms, a second press starts the drag
            if PaneAreas::hit(areas.carousel, col, row) {
                if PaneAreas::hit(CarouselWidget::prev_rect(areas.carousel), col, row) {
                    app.state.carousel.prev();
                    return;
                }
                if PaneAreas::hit(CarouselWidget::next_rect(areas.carousel), col, row) {
                    app.state.carousel.next();
                    return;
                }
                let slot =
                    CarouselWidget::slot_at(areas.carousel, &app.state.carousel, col, row);
                if let Some(index) = slot {
                    let Some(disc) = app.state.shelf.get(index).cloned() else {
                        return;
                    };
                    if player.snapshot().armed == Some(disc.id()) {
                        // Armed case: this press begins the drag
                        if player.begin_drag(disc) {
                            app.state.drag_pos = Some((col, row));
                        }
                    } else {
                        app.state.carousel.center_on(index);
                        player.select_disc(disc.id());
                        app.state.set_message(format!(
                            "Armed: {} - drag it to the tray",
                            disc.title()
                        ));
                    }
                }
                return;
            }

            // Controls
            if PaneAreas::hit(areas.controls, col, row) {
                match ControlsWidget::hit(areas.controls, col, row) {
                    Some(ControlHit::SkipBack) => player.skip_back(),
                    Some(ControlHit::Play) => {
                        if player.has_disc() {
                            player.toggle_play();
                        } else {
                            app.state.set_warning("No disc in the tray");
                        }
                    }
                    Some(ControlHit::SkipForward) => player.skip_forward(),
                    Some(ControlHit::Eject) => {
                        if player.has_disc() {
                            player.eject(Instant::now());
                            app.state.set_message("Ejecting...");
                        } else {
                            app.state.set_warning("No disc to eject");
                        }
                    }
                    Some(ControlHit::Volume) | Some(ControlHit::Bass) | None => {}
                }
                return;
            }

            // Track list
            if PaneAreas::hit(areas.track_list, col, row) {
                let index = TrackListWidget::track_at(areas.track_list, &app.state.player, col, row);
                if let Some(index) = index {
                    player.select_track(index);
                }
            }
        }

        MouseEventKind::Drag(MouseButton::Left) => {
            if app.state.player.dragging.is_some() {
                app.state.drag_pos = Some((col, row));
            }
        }

        MouseEventKind::Up(MouseButton::Left) => {
            if player.snapshot().dragging.is_some() {
                let over_tray = PaneAreas::hit(areas.tray, col, row);
                let title = player
                    .snapshot()
                    .dragging
                    .as_ref()
                    .map(|d| d.title().to_string())
                    .unwrap_or_default();
                if player.finish_drag(over_tray) {
                    app.state.set_success(format!("Playing: {}", title));
                } else if over_tray {
                    app.state.set_warning("Tray is busy");
                } else {
                    app.state.clear_message();
                }
                app.state.drag_pos = None;
            }
        }

        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let delta: i16 = if mouse.kind == MouseEventKind::ScrollUp { 5 } else { -5 };
            if PaneAreas::hit(areas.controls, col, row) {
                match ControlsWidget::hit(areas.controls, col, row) {
                    Some(ControlHit::Volume) => player.adjust_volume(delta),
                    Some(ControlHit::Bass) => player.adjust_bass(delta),
                    _ => {}
                }
            } else if PaneAreas::hit(areas.carousel, col, row) {
                if delta > 0 {
                    app.state.carousel.prev();
                } else {
                    app.state.carousel.next();
                }
            }
        }

        _ => {}
    }
}

fn render_ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::vertical([
        Constraint::Min(12),    // Tray + track list
        Constraint::Length(7),  // Controls
        Constraint::Length(12), // Carousel
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    let tray_row = Layout::horizontal([
        Constraint::Min(40),    // Tray
        Constraint::Length(34), // Track list
    ])
    .split(rows[0]);

    // Record regions for mouse hit-testing
    app.state.areas = PaneAreas {
        tray: tray_row[0],
        track_list: tray_row[1],
        controls: rows[1],
        carousel: rows[2],
    };

    let state = &app.state;
    let theme = state.theme.clone();

    frame.render_widget(
        TrayWidget::new(&state.player, &theme)
            .angle(state.angle)
            .eject_progress(state.eject_progress),
        tray_row[0],
    );
    frame.render_widget(TrackListWidget::new(&state.player, &theme), tray_row[1]);
    frame.render_widget(ControlsWidget::new(&state.player, &theme), rows[1]);

    let scanning = state.is_scanning.then_some(state.scan_progress);
    frame.render_widget(
        CarouselWidget::new(&state.shelf, &state.carousel, &theme)
            .armed(state.player.armed)
            .inserted(state.player.inserted.as_ref().map(|d| d.id()))
            .scanning(scanning),
        rows[2],
    );

    let now_playing = state
        .player
        .spinning()
        .then(|| state.player.current_track().map(|t| t.to_string()))
        .flatten();
    frame.render_widget(
        StatusBarWidget::new(state.mode, &state.command_buffer, &theme)
            .message(state.message.as_deref(), state.message_type)
            .now_playing(now_playing),
        rows[3],
    );

    // Drag overlay: a small disc follows the pointer
    if state.player.dragging.is_some() {
        if let Some((col, row)) = state.drag_pos {
            let buf = frame.buffer_mut();
            if col < area.width && row < area.height {
                buf.set_string(col, row, "◉", theme.armed_ring());
            }
        }
    }

    // Help overlay on top of everything
    if state.show_help {
        let overlay = centered_rect(area, 70, 90);
        frame.render_widget(HelpWidget::new(&theme).scroll(state.help_scroll), overlay);
    }
}

/// Centered sub-rectangle taking the given percentages of the area
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
