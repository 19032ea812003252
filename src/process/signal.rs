use libc::{signal, SIGINT, SIG_IGN};

/// Drop interactive interrupts on the floor for the shell process itself.
///
/// Re-armed on every loop pass. Children pick up whatever the OS hands the
/// process group; nothing is forwarded explicitly.
pub fn ignore_interrupts() {
    unsafe {
        signal(SIGINT, SIG_IGN);
    }
}
