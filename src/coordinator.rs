/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::ResampleError;
use crate::threading_policy::ExecutionContext;
use rayon::ThreadPool;
use std::any::Any;
use std::iter::StepBy;
use std::ops::Range;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Longest single blocking wait, the interrupt token is polled in between.
const WAIT_SLICE: Duration = Duration::from_millis(10);

/// Caller-held handle that stops a running resize.
///
/// Cloning shares the flag. Once cancelled a token stays cancelled, so the same
/// token makes every later resize fail with [`ResampleError::Interrupted`] too.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Interleaved slice of a pass: `offset, offset + stride, offset + 2 * stride, …`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Partition {
    pub offset: usize,
    pub stride: usize,
}

impl Partition {
    pub(crate) fn new(offset: usize, stride: usize) -> Partition {
        Partition { offset, stride }
    }

    #[inline]
    pub(crate) fn indices(&self, len: usize) -> StepBy<Range<usize>> {
        (self.offset..len).step_by(self.stride)
    }
}

/// State shared by every partition of one job.
pub(crate) struct JobControl<'a> {
    processed: AtomicUsize,
    total: usize,
    cancelled: AtomicBool,
    interrupt: Option<&'a CancellationToken>,
}

impl<'a> JobControl<'a> {
    pub(crate) fn new(total: usize, interrupt: Option<&'a CancellationToken>) -> JobControl<'a> {
        JobControl {
            processed: AtomicUsize::new(0),
            total: total.max(1),
            cancelled: AtomicBool::new(false),
            interrupt,
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt.is_some_and(|token| token.is_cancelled())
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    fn checkpoint(&self) -> Result<(), ResampleError> {
        if self.is_interrupted() {
            return Err(ResampleError::Interrupted);
        }
        if self.cancelled.load(Ordering::Acquire) {
            return Err(ResampleError::Cancelled);
        }
        Ok(())
    }

    fn advance(&self) -> usize {
        self.processed.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn fraction_of(&self, processed: usize) -> f32 {
        (processed.min(self.total) as f64 / self.total as f64) as f32
    }

    fn fraction(&self) -> f32 {
        self.fraction_of(self.processed.load(Ordering::Acquire))
    }
}

/// Per-partition view of the job, handed to pass workers.
///
/// Only the coordinating partition carries a listener.
pub(crate) struct Progress<'p, 'n> {
    control: &'p JobControl<'p>,
    notify: Option<&'p mut (dyn FnMut(f32) + 'n)>,
    last_reported: f32,
}

impl<'p, 'n> Progress<'p, 'n> {
    fn reporting(
        control: &'p JobControl<'p>,
        notify: &'p mut (dyn FnMut(f32) + 'n),
        last_reported: f32,
    ) -> Progress<'p, 'n> {
        Progress {
            control,
            notify: Some(notify),
            last_reported,
        }
    }

    fn silent(control: &'p JobControl<'p>) -> Progress<'p, 'n> {
        Progress {
            control,
            notify: None,
            last_reported: 0f32,
        }
    }

    /// Fails once the job is interrupted or cancelled, checked before every row or column.
    #[inline]
    pub(crate) fn checkpoint(&self) -> Result<(), ResampleError> {
        self.control.checkpoint()
    }

    /// Marks one row or column as done.
    #[inline]
    pub(crate) fn step(&mut self) {
        let processed = self.control.advance();
        if let Some(notify) = self.notify.as_mut() {
            let fraction = self.control.fraction_of(processed);
            if fraction > self.last_reported {
                self.last_reported = fraction;
                notify(fraction);
            }
        }
    }
}

type PartitionResult = (usize, Result<(), ResampleError>);

/// Runs the passes of one job over `N` interleaved partitions.
///
/// Partition 0 runs on the calling thread, the rest are spawned into the
/// execution context. Every pass returns only after all of its partitions
/// have finished, which is the barrier between passes.
pub(crate) struct Coordinator<'a, 'n> {
    context: ExecutionContext<'a>,
    threads: usize,
    control: JobControl<'a>,
    timeout: Option<Duration>,
    budget: Option<Duration>,
    notify: &'n mut dyn FnMut(f32),
    last_reported: f32,
}

impl<'a, 'n> Coordinator<'a, 'n> {
    pub(crate) fn new(
        threads: usize,
        shared: Option<&'a ThreadPool>,
        interrupt: Option<&'a CancellationToken>,
        timeout: Option<Duration>,
        total: usize,
        notify: &'n mut dyn FnMut(f32),
    ) -> Result<Coordinator<'a, 'n>, ResampleError> {
        let threads = threads.max(1);
        let context = ExecutionContext::resolve(threads, shared)?;
        Ok(Coordinator {
            context,
            threads,
            control: JobControl::new(total, interrupt),
            timeout,
            budget: timeout,
            notify,
            last_reported: 0f32,
        })
    }

    #[inline]
    pub(crate) fn partitions(&self) -> usize {
        self.threads
    }

    /// Runs `work` once per partition, `states[k]` goes to partition `k`.
    pub(crate) fn run_pass<T, W>(
        &mut self,
        pass: &'static str,
        states: Vec<T>,
        work: W,
    ) -> Result<(), ResampleError>
    where
        T: Send,
        W: Fn(Partition, T, &mut Progress<'_, '_>) -> Result<(), ResampleError> + Sync,
    {
        let Coordinator {
            context,
            threads: _,
            control,
            timeout,
            budget,
            notify,
            last_reported,
        } = &mut *self;
        let control: &JobControl<'a> = control;

        let stride = states.len();
        let mut states = states.into_iter();
        let Some(first) = states.next() else {
            return Ok(());
        };

        trace!(pass, partitions = stride, "pass started");

        let result = match context.pool() {
            None => {
                let mut progress = Progress::reporting(control, &mut **notify, *last_reported);
                let result = run_guarded(|| work(Partition::new(0, stride), first, &mut progress));
                *last_reported = progress.last_reported;
                result.map_err(|e| {
                    control.cancel();
                    wrap_failure(0, e)
                })
            }
            Some(pool) => pool.in_place_scope(|scope| {
                let (sender, receiver) = mpsc::channel::<PartitionResult>();
                for (offset, state) in (1..stride).zip(states) {
                    let sender = sender.clone();
                    let work = &work;
                    scope.spawn(move |_| {
                        let mut progress = Progress::silent(control);
                        let result =
                            run_guarded(|| work(Partition::new(offset, stride), state, &mut progress));
                        let failed = result.is_err();
                        _ = sender.send((offset, result));
                        // Raised after sending so the root cause is queued ahead of
                        // any partition that stops because of it.
                        if failed {
                            control.cancel();
                        }
                    });
                }
                drop(sender);

                let mut progress = Progress::reporting(control, &mut **notify, *last_reported);
                let result = run_guarded(|| work(Partition::new(0, stride), first, &mut progress));
                *last_reported = progress.last_reported;

                match result {
                    Ok(()) => await_partitions(receiver, stride - 1, control, budget, *timeout),
                    Err(ResampleError::Cancelled) => {
                        await_partitions(receiver, stride - 1, control, budget, *timeout)
                            .and(Err(ResampleError::Cancelled))
                    }
                    Err(e) => {
                        control.cancel();
                        Err(wrap_failure(0, e))
                    }
                }
            }),
        };

        match &result {
            Ok(()) => {
                let fraction = control.fraction();
                if fraction > *last_reported {
                    *last_reported = fraction;
                    (*notify)(fraction);
                }
                trace!(pass, "pass finished");
            }
            Err(e) => warn!(pass, error = %e, "pass failed"),
        }
        result
    }
}

impl Drop for Coordinator<'_, '_> {
    fn drop(&mut self) {
        if self.context.is_owned() {
            debug!(threads = self.threads, "owned resample thread pool released");
        }
    }
}

/// Waits until `pending` spawned partitions reported back.
fn await_partitions(
    receiver: Receiver<PartitionResult>,
    mut pending: usize,
    control: &JobControl<'_>,
    budget: &mut Option<Duration>,
    timeout: Option<Duration>,
) -> Result<(), ResampleError> {
    let mut stopped = false;
    while pending > 0 {
        if control.is_interrupted() {
            control.cancel();
            return Err(ResampleError::Interrupted);
        }
        let slice = budget.map_or(WAIT_SLICE, |remaining| remaining.min(WAIT_SLICE));
        let started = Instant::now();
        let received = receiver.recv_timeout(slice);
        if let Some(remaining) = budget.as_mut() {
            *remaining = remaining.saturating_sub(started.elapsed());
        }
        match received {
            Ok((_, Ok(()))) => pending -= 1,
            Ok((_, Err(ResampleError::Cancelled))) => {
                stopped = true;
                pending -= 1;
            }
            Ok((worker, Err(e))) => {
                control.cancel();
                return Err(wrap_failure(worker, e));
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if pending > 0 && budget.is_some_and(|remaining| remaining.is_zero()) {
            control.cancel();
            let limit = timeout.unwrap_or_default();
            warn!(?limit, pending, "resample workers timed out");
            return Err(ResampleError::TimeoutExceeded(limit));
        }
    }
    if stopped {
        return Err(ResampleError::Cancelled);
    }
    Ok(())
}

fn wrap_failure(worker: usize, error: ResampleError) -> ResampleError {
    match error {
        ResampleError::Interrupted => ResampleError::Interrupted,
        error => ResampleError::WorkerFailure {
            worker,
            source: Box::new(error),
        },
    }
}

fn run_guarded<F: FnOnce() -> Result<(), ResampleError>>(f: F) -> Result<(), ResampleError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(ResampleError::WorkerPanicked(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU8;

    fn no_progress(_: f32) {}

    #[test]
    fn partitions_are_disjoint_and_cover() {
        let stride = 3;
        let mut seen = vec![0u8; 10];
        for offset in 0..stride {
            for i in Partition::new(offset, stride).indices(10) {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&x| x == 1));
        assert_eq!(Partition::new(2, 4).indices(2).count(), 0);
    }

    #[test]
    fn pass_visits_every_index_once() {
        let hits: Vec<AtomicU8> = (0..50).map(|_| AtomicU8::new(0)).collect();
        let mut seen = Vec::new();
        {
            let mut notify = |fraction: f32| seen.push(fraction);
            let mut coordinator = Coordinator::new(4, None, None, None, 50, &mut notify).unwrap();
            assert_eq!(coordinator.partitions(), 4);
            coordinator
                .run_pass("test", vec![(); 4], |partition, _, progress| {
                    for i in partition.indices(50) {
                        progress.checkpoint()?;
                        hits[i].fetch_add(1, Ordering::Relaxed);
                        progress.step();
                    }
                    Ok(())
                })
                .unwrap();
        }
        assert!(hits.iter().all(|x| x.load(Ordering::Relaxed) == 1));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last().copied(), Some(1f32));
    }

    #[test]
    fn worker_error_is_wrapped() {
        let mut notify = no_progress;
        let mut coordinator = Coordinator::new(3, None, None, None, 30, &mut notify).unwrap();
        let result = coordinator.run_pass("test", vec![(); 3], |partition, _, progress| {
            for _ in partition.indices(30) {
                progress.checkpoint()?;
                if partition.offset == 2 {
                    return Err(ResampleError::PixelAccess("broken row".to_string()));
                }
                progress.step();
            }
            Ok(())
        });
        match result {
            Err(ResampleError::WorkerFailure { worker, source }) => {
                assert_eq!(worker, 2);
                assert!(matches!(*source, ResampleError::PixelAccess(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inline_error_is_wrapped() {
        let mut notify = no_progress;
        let mut coordinator = Coordinator::new(1, None, None, None, 4, &mut notify).unwrap();
        let result = coordinator.run_pass("test", vec![()], |_, _, _| {
            Err(ResampleError::PixelAccess("broken row".to_string()))
        });
        assert!(matches!(
            result,
            Err(ResampleError::WorkerFailure { worker: 0, .. })
        ));
    }

    #[test]
    fn panic_is_wrapped() {
        let mut notify = no_progress;
        let mut coordinator = Coordinator::new(2, None, None, None, 4, &mut notify).unwrap();
        let result = coordinator.run_pass("test", vec![(); 2], |partition, _, _| {
            if partition.offset == 1 {
                panic!("boom");
            }
            Ok(())
        });
        match result {
            Err(ResampleError::WorkerFailure { worker, source }) => {
                assert_eq!(worker, 1);
                match *source {
                    ResampleError::WorkerPanicked(message) => assert_eq!(message, "boom"),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn timeout_stops_the_pass() {
        let late_writes = AtomicUsize::new(0);
        let mut notify = no_progress;
        let mut coordinator = Coordinator::new(
            2,
            None,
            None,
            Some(Duration::from_millis(20)),
            4,
            &mut notify,
        )
        .unwrap();
        let result = coordinator.run_pass("test", vec![(); 2], |partition, _, progress| {
            if partition.offset == 1 {
                std::thread::sleep(Duration::from_millis(300));
                progress.checkpoint()?;
                late_writes.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        });
        assert!(matches!(result, Err(ResampleError::TimeoutExceeded(_))));
        assert_eq!(late_writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn interrupt_token_stops_the_pass() {
        let token = CancellationToken::new();
        token.cancel();
        let mut notify = no_progress;
        let mut coordinator =
            Coordinator::new(2, None, Some(&token), None, 10, &mut notify).unwrap();
        let result = coordinator.run_pass("test", vec![(); 2], |partition, _, progress| {
            for _ in partition.indices(10) {
                progress.checkpoint()?;
                progress.step();
            }
            Ok(())
        });
        assert!(matches!(result, Err(ResampleError::Interrupted)));
    }

    #[test]
    fn shared_pool_survives_failure() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        {
            let mut notify = no_progress;
            let mut coordinator =
                Coordinator::new(3, Some(&pool), None, None, 3, &mut notify).unwrap();
            let result = coordinator.run_pass("test", vec![(); 3], |partition, _, _| {
                if partition.offset == 1 {
                    return Err(ResampleError::Cancelled);
                }
                Ok(())
            });
            assert!(result.is_err());
        }
        assert_eq!(pool.install(|| 2 + 2), 4);
    }

    #[test]
    fn owned_pool_lives_until_job_end() {
        let mut notify = no_progress;
        let mut coordinator = Coordinator::new(3, None, None, None, 6, &mut notify).unwrap();
        let failed = coordinator.run_pass("first", vec![(); 3], |partition, _, _| {
            if partition.offset == 2 {
                return Err(ResampleError::PixelAccess("broken row".to_string()));
            }
            Ok(())
        });
        assert!(matches!(
            failed,
            Err(ResampleError::WorkerFailure { worker: 2, .. })
        ));
        assert!(coordinator.context.is_owned());
        assert!(coordinator.context.pool().is_some());
        let counted = AtomicUsize::new(0);
        coordinator
            .run_pass("second", vec![(); 3], |_, _, _| {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        assert_eq!(counted.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn interrupt_while_waiting_on_workers() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut notify = no_progress;
        let mut coordinator =
            Coordinator::new(2, None, Some(&token), None, 10, &mut notify).unwrap();
        let started = Instant::now();
        let result = std::thread::scope(|scope| {
            scope.spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                canceller.cancel();
            });
            coordinator.run_pass("test", vec![(); 2], |partition, _, progress| {
                if partition.offset == 1 {
                    std::thread::sleep(Duration::from_millis(300));
                    progress.checkpoint()?;
                }
                Ok(())
            })
        });
        assert!(matches!(result, Err(ResampleError::Interrupted)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
