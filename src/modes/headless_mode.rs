use crate::data::Program;

/// Simulates the configured number of frames as fast as possible,
/// each advancing the clock by one refresh interval.
pub fn run_frames(prog: &mut Program) {
    let dt = prog.refresh_rate();

    for _ in 0..prog.frames() {
        prog.render(dt);
    }
}

pub fn headless_main(mut prog: Program) {
    prog.print_startup_info();
    run_frames(&mut prog);
    prog.print_summary();
}
