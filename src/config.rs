// config.rs: compile-time defaults and runtime worker-count selection.
//
// Window sizes are fixed by the legacy formats. The worker count only affects
// match collection in the optimal parser and can be overridden by the
// LZFORGE_NBWORKERS environment variable or per session through
// `FindOptions::with_task_count`.

use log::warn;

// Ring-buffer window shared by Lz10, IrLz and Lzss01.
pub const WINDOW_4K: usize = 0x1000;

// Window addressed by the 13-bit SpikeChunsoft displacement.
pub const WINDOW_SPIKE_CHUNSOFT: usize = 0x1FFF;

// Lzss01 ring-buffer cursor at the start of a stream (0x1000 - 18).
pub const LZSS01_PRE_BUFFER_SIZE: usize = 0xFEE;

// Number of chain links a hash-chain finder follows per position before it
// gives up. Long enough to be exhaustive within a 4 KiB window on text.
pub const DEFAULT_SEARCH_DEPTH: usize = 256;

// Bits hashed by the hash-chain finder head table.
pub const HASH_LOG: u32 = 15;

// Upper bound on selectable match-collection workers.
pub const NB_WORKERS_MAX: usize = 200;

/// Environment variable consulted by [`init_task_count`].
pub const ENV_NBWORKERS: &str = "LZFORGE_NBWORKERS";

/// Default worker count when nothing overrides it.
///
/// With the `multithread` feature the physical core count is used, minus a
/// small reserve (one core plus one per eight) for other work. Without the
/// feature the default is a single worker.
pub fn default_task_count() -> usize {
    #[cfg(feature = "multithread")]
    {
        let nb_cores = num_cpus::get_physical();
        let spared = 1 + (nb_cores >> 3);
        if nb_cores <= spared {
            1
        } else {
            nb_cores - spared
        }
    }
    #[cfg(not(feature = "multithread"))]
    {
        1
    }
}

/// Worker count for a new session: `LZFORGE_NBWORKERS` if it holds a valid
/// number, otherwise [`default_task_count`].
pub fn init_task_count() -> usize {
    init_task_count_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_task_count`].
///
/// `Some(s)` is the raw variable value, `None` means it is unset. Zero and
/// non-numeric values are ignored; large values are clamped to
/// [`NB_WORKERS_MAX`].
pub fn init_task_count_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(0) => {}
            Ok(n) => return n.min(NB_WORKERS_MAX),
            Err(_) => {
                warn!(
                    "ignoring environment variable {}={}: not a valid unsigned value",
                    ENV_NBWORKERS, env
                );
            }
        }
    }
    default_task_count()
}
