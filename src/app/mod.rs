mod renderer;

pub use renderer::{Renderer, RendererStatus};

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
    },
    time::Duration,
};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    generators::generate_maze,
    maze::Maze,
    solvers::solve_maze,
    viz::{ChannelVisualizer, VizEvent},
};

/// Maximum number of viz events to buffer in the channel between compute and render threads
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
/// Timeout for polling input events in the input thread, a.k.a.
/// how often to check the stop flag
const USER_INPUT_EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Time per rendered event when the maze is at the reference size
const RENDER_REFRESH_RATE: Duration = Duration::from_micros(20);
/// Maze dimension the refresh rate is calibrated against
const REFERENCE_MAZE_SIZE: u32 = 255;

/// Host configuration, parsed from the command line by the binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub num_cols: u16,
    pub num_rows: u16,
    /// Pixel edge length used for cell bounding boxes
    pub cell_size: u16,
    /// Fixed seed for a deterministic carve
    pub seed: Option<u64>,
    /// Carve and display without solving
    pub generate_only: bool,
}

/// How a run ended, mapped to the process exit status by the binary.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// User pressed Esc or the terminal was too small
    Cancelled,
    /// Generate-only mode finished
    GenerateOnly,
    /// Solving finished; `true` when a path to the exit was found
    Solved(bool),
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Runs one animated generate(+solve) cycle: an input thread watching for
/// Esc, a render thread consuming viz events, and a compute thread driving
/// the maze through a channel-backed visualizer.
pub fn run(config: &Config, stdout: &mut Stdout) -> std::io::Result<RunOutcome> {
    // Flag to stop all threads. Set on Esc or when the renderer gives up.
    let should_stop = Arc::new(AtomicBool::new(false));

    let should_stop_for_input = should_stop.clone();
    // Spawn a thread to listen for user input
    let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
        listen_for_cancel(USER_INPUT_EVENT_POLL_TIMEOUT, &should_stop_for_input)
    });

    let (viz_event_tx, viz_event_rx) =
        std::sync::mpsc::sync_channel::<VizEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);

    // Spawn a thread to consume viz events and draw the maze
    let refresh = render_refresh_time(config.num_cols, config.num_rows);
    let should_stop_for_render = should_stop.clone();
    let render_thread_handle = std::thread::spawn(move || {
        Renderer::new(refresh).render(viz_event_rx, &should_stop_for_render)
    });

    // Spawn a thread to generate and optionally solve the maze
    let compute_config = config.clone();
    let compute_thread_handle =
        std::thread::spawn(move || compute(&compute_config, viz_event_tx));

    // The render thread exits when the compute thread drops its sender and
    // the channel drains, or when the stop flag is raised
    let status = render_thread_handle
        .join()
        .expect("Render thread panicked")?;

    // Signal the input thread to exit and wait for it
    should_stop.store(true, Ordering::Release);
    input_thread_handle.join().expect("Input thread panicked")?;

    let goal_reached = compute_thread_handle
        .join()
        .expect("Compute thread panicked");

    if let RendererStatus::Cancelled = status {
        tracing::info!("Run was cancelled");
        return Ok(RunOutcome::Cancelled);
    }

    let (msg, outcome) = match goal_reached {
        Some(true) => ("Path found! ", RunOutcome::Solved(true)),
        Some(false) => ("No path found. ", RunOutcome::Solved(false)),
        None => ("Maze generated. ", RunOutcome::GenerateOnly),
    };
    stdout.execute(style::PrintStyledContent(
        msg.with(Color::Green).attribute(Attribute::Bold),
    ))?;
    stdout.execute(style::PrintStyledContent(
        "Press Esc to exit...\r\n"
            .with(Color::Blue)
            .attribute(Attribute::Bold),
    ))?;
    // Wait for user to press Esc
    wait_for_esc()?;
    Ok(outcome)
}

/// Generate the maze and, unless in generate-only mode, solve it.
/// Returns whether the goal was reached, or `None` when no solve ran.
fn compute(config: &Config, viz_event_tx: SyncSender<VizEvent>) -> Option<bool> {
    let viz = ChannelVisualizer::new(viz_event_tx, config.num_cols, config.num_rows);
    let mut maze = match Maze::with_visualizer(
        config.num_cols,
        config.num_rows,
        config.cell_size,
        Box::new(viz),
    ) {
        Ok(maze) => maze,
        Err(e) => {
            // The binary validates dimensions before spawning us
            tracing::error!("Maze construction failed: {e}");
            return None;
        }
    };

    generate_maze(&mut maze, config.seed);
    tracing::info!(
        "Generated {}x{} maze (seed: {:?})",
        config.num_cols,
        config.num_rows,
        config.seed
    );

    if config.generate_only {
        return None;
    }

    // Both passes share the visited marker
    maze.reset_visited();
    let path = solve_maze(&mut maze);
    match &path {
        Some(path) => tracing::info!("Solved: path of {} cells", path.len()),
        None => tracing::info!("No path to the exit"),
    }
    Some(path.is_some())
    // Maze is dropped here, as well as the viz event sender
}

/// Poll for key events until Esc is pressed or the stop flag is raised.
/// This runs in its own thread so Esc can interrupt an ongoing animation.
fn listen_for_cancel(
    event_poll_timeout: Duration,
    should_stop: &AtomicBool,
) -> std::io::Result<()> {
    loop {
        // Check if this thread should exit
        if should_stop.load(Ordering::Acquire) {
            return Ok(());
        }

        // Poll for events with a timeout
        if !event::poll(event_poll_timeout)? {
            // No event available, continue loop to check the flag again
            continue;
        }

        if let event::Event::Key(key_event) = event::read()?
            && key_event.kind == event::KeyEventKind::Press
            && key_event.code == KeyCode::Esc
        {
            tracing::debug!("[input loop] Esc key pressed, stopping");
            should_stop.store(true, Ordering::Release);
            return Ok(());
        }
    }
}

/// Wait for the user to press the Esc key
/// This function blocks until Esc is pressed
fn wait_for_esc() -> std::io::Result<()> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                break;
            }
        }
    }
    Ok(())
}

/// Per-event animation delay, calibrated so small mazes animate slowly
/// enough to follow and large mazes do not crawl.
fn render_refresh_time(num_cols: u16, num_rows: u16) -> Duration {
    let size = (num_cols.max(num_rows) as u32).min(REFERENCE_MAZE_SIZE);
    RENDER_REFRESH_RATE * (REFERENCE_MAZE_SIZE / size).pow(2)
}
