//! CPU cycle counter backing the `cpu_cycles` measurement mode.

/// Read the current CPU cycle counter.
///
/// x86/x86_64 read the TSC fenced by LFENCE on both sides so the read is not
/// reordered around the measured code. aarch64 reads CNTVCT_EL0, a fixed
/// frequency counter that is accessible from userspace.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        // SAFETY: LFENCE and RDTSC are available on every x86_64 CPU.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "x86")]
    {
        use core::arch::x86::{_mm_lfence, _rdtsc};
        // SAFETY: requires SSE2 for LFENCE, which the cpu_cycles mode assumes.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let val: u64;
        // SAFETY: CNTVCT_EL0 is readable from EL0 on all supported kernels.
        unsafe {
            core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val);
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86, x86_64, or aarch64 architecture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn test_read_cycles_roughly_monotonic() {
        let c1 = read_cycles();
        let mut acc = 0u64;
        for i in 0..1_000 {
            acc = black_box(acc.wrapping_add(i));
        }
        let c2 = read_cycles();

        black_box(acc);
        assert!(c2 >= c1 || c1 - c2 < 1000, "counter went backwards: {} -> {}", c1, c2);
    }
}
