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
use crate::coordinator::CancellationToken;
use crate::progress::{ListenerId, ProgressListener, ProgressListeners};
use crate::resize_job::ResizeJob;
use crate::threading_policy::ThreadingPolicy;
use crate::unsharp::{Sharpener, UnsharpFilter, UnsharpenMask};
use crate::{
    DimensionConstraint, ImageSize, ImageStoreMut, ResampleError, ResamplingFilter,
    ResamplingFunction, RowSource,
};
use rayon::ThreadPool;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Represents base scaling structure
pub struct Scaler {
    pub(crate) resampling_filter: ResamplingFilter,
    pub(crate) threading_policy: ThreadingPolicy,
    pub(crate) timeout: Option<Duration>,
    pub(crate) thread_pool: Option<Arc<ThreadPool>>,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) unsharpen_mask: UnsharpenMask,
    pub(crate) sharpener: Box<dyn Sharpener>,
    listeners: ProgressListeners,
}

pub trait Scaling {
    fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy);

    /// Resizes `source` into a newly allocated image with the source layout
    fn resize<S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        new_size: ImageSize,
    ) -> Result<ImageStoreMut<'static>, ResampleError>;

    /// Resizes `source` into `destination`.
    ///
    /// A destination that already has the requested size is overwritten in place,
    /// otherwise it is replaced by a new allocation.
    fn resize_into<'a, S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        new_size: ImageSize,
        destination: &mut ImageStoreMut<'a>,
    ) -> Result<(), ResampleError>;
}

impl Scaler {
    /// Creates new Scaler instance with corresponding filter
    pub fn new(filter: ResamplingFunction) -> Self {
        Scaler::with_filter(filter.get_resampling_filter())
    }

    /// Creates new Scaler instance with a custom kernel
    pub fn with_filter(filter: ResamplingFilter) -> Self {
        Scaler {
            resampling_filter: filter,
            threading_policy: ThreadingPolicy::default(),
            timeout: None,
            thread_pool: None,
            cancellation: None,
            unsharpen_mask: UnsharpenMask::None,
            sharpener: Box::new(UnsharpFilter::default()),
            listeners: ProgressListeners::default(),
        }
    }

    pub fn set_resampling_filter(&mut self, function: ResamplingFunction) {
        self.resampling_filter = function.get_resampling_filter();
    }

    pub fn set_filter(&mut self, filter: ResamplingFilter) {
        self.resampling_filter = filter;
    }

    pub fn filter(&self) -> ResamplingFilter {
        self.resampling_filter
    }

    /// Upper bound on the time spent waiting for worker threads, `Duration::ZERO` waits forever.
    ///
    /// Only waiting is measured, the share of the work done on the calling thread
    /// is not. With [`ThreadingPolicy::Single`] nothing is waited on, so the
    /// timeout never fires however long the job runs.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = if timeout.is_zero() {
            None
        } else {
            Some(timeout)
        };
    }

    /// Runs jobs on a caller owned pool instead of building one per job.
    /// The pool is never shut down by the scaler.
    ///
    /// The calling thread blocks while it waits for the other partitions and does
    /// not steal work. Do not resize from a worker of this same pool, for example
    /// inside `pool.install(|| images.par_iter()...)`: every worker may end up
    /// waiting on partitions queued behind it.
    pub fn set_thread_pool(&mut self, thread_pool: Option<Arc<ThreadPool>>) {
        self.thread_pool = thread_pool;
    }

    pub fn set_cancellation_token(&mut self, token: Option<CancellationToken>) {
        self.cancellation = token;
    }

    pub fn set_unsharpen_mask(&mut self, mask: UnsharpenMask) {
        self.unsharpen_mask = mask;
    }

    pub fn set_sharpener(&mut self, sharpener: Box<dyn Sharpener>) {
        self.sharpener = sharpener;
    }

    pub fn add_progress_listener<L: ProgressListener + 'static>(&mut self, listener: L) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Returns `false` when no listener with this id is registered
    pub fn remove_progress_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Resolves `constraint` against the source size and resizes to it
    pub fn resize_constrained<S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        constraint: DimensionConstraint,
    ) -> Result<ImageStoreMut<'static>, ResampleError> {
        let new_size = constraint.resolve(source.size());
        self.resize(source, new_size)
    }

    fn make_job<S: RowSource + ?Sized>(
        &self,
        source: &S,
        new_size: ImageSize,
    ) -> Result<ResizeJob, ResampleError> {
        ResizeJob::new(
            source.size(),
            new_size,
            source.layout(),
            self.resampling_filter,
            self.threading_policy.thread_count(),
            self.timeout,
        )
    }

    fn run<S: RowSource + ?Sized>(
        &mut self,
        job: &ResizeJob,
        source: &S,
        destination: &mut ImageStoreMut<'_>,
    ) -> Result<(), ResampleError> {
        let listeners = &mut self.listeners;
        let mut notify = |fraction: f32| listeners.fire(fraction);
        job.execute(
            source,
            destination.as_bytes_mut(),
            self.thread_pool.as_deref(),
            self.cancellation.as_ref(),
            &mut notify,
        )?;
        if self.unsharpen_mask != UnsharpenMask::None {
            self.sharpener
                .sharpen(destination, self.unsharpen_mask.amount())?;
        }
        Ok(())
    }
}

impl Default for Scaler {
    fn default() -> Self {
        Scaler::new(ResamplingFunction::default())
    }
}

impl Debug for Scaler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scaler")
            .field("resampling_filter", &self.resampling_filter)
            .field("threading_policy", &self.threading_policy)
            .field("timeout", &self.timeout)
            .field("shared_pool", &self.thread_pool.is_some())
            .field("cancellation", &self.cancellation)
            .field("unsharpen_mask", &self.unsharpen_mask)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl Scaling for Scaler {
    fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        self.threading_policy = threading_policy;
    }

    fn resize<S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        new_size: ImageSize,
    ) -> Result<ImageStoreMut<'static>, ResampleError> {
        let job = self.make_job(source, new_size)?;
        let mut destination =
            ImageStoreMut::alloc(new_size.width, new_size.height, job.layout)?;
        self.run(&job, source, &mut destination)?;
        Ok(destination)
    }

    fn resize_into<'a, S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        new_size: ImageSize,
        destination: &mut ImageStoreMut<'a>,
    ) -> Result<(), ResampleError> {
        let job = self.make_job(source, new_size)?;
        if destination.get_size() == new_size {
            if destination.channels() != job.channels() {
                return Err(ResampleError::ChannelMismatch {
                    source_channels: job.channels(),
                    destination_channels: destination.channels(),
                });
            }
            return self.run(&job, source, destination);
        }
        let mut output = ImageStoreMut::alloc(new_size.width, new_size.height, job.layout)?;
        self.run(&job, source, &mut output)?;
        *destination = output;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageStore, PixelLayout};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gradient(width: usize, height: usize, layout: PixelLayout) -> ImageStore<'static> {
        let channels = layout.channels();
        let data = (0..width * height * channels)
            .map(|i| ((i * 37 + i / 7) % 256) as u8)
            .collect();
        ImageStore::new(data, width, height, layout).unwrap()
    }

    struct FaultySource {
        inner: ImageStore<'static>,
        slow_row: Option<usize>,
        failing_row: Option<usize>,
        panicking_row: Option<usize>,
        reads: AtomicUsize,
    }

    impl FaultySource {
        fn new(inner: ImageStore<'static>) -> FaultySource {
            FaultySource {
                inner,
                slow_row: None,
                failing_row: None,
                panicking_row: None,
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl RowSource for FaultySource {
        fn size(&self) -> ImageSize {
            self.inner.size()
        }

        fn layout(&self) -> PixelLayout {
            self.inner.layout()
        }

        fn read_row(&self, y: usize, row: &mut [u8]) -> Result<(), ResampleError> {
            if Some(y) == self.slow_row {
                std::thread::sleep(Duration::from_millis(300));
            }
            if Some(y) == self.failing_row {
                return Err(ResampleError::PixelAccess(format!("row {y} is gone")));
            }
            if Some(y) == self.panicking_row {
                panic!("row {y} exploded");
            }
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read_row(y, row)
        }
    }

    struct CountingSharpener(Arc<AtomicUsize>);

    impl Sharpener for CountingSharpener {
        fn sharpen(&self, _: &mut ImageStoreMut<'_>, amount: f32) -> Result<(), ResampleError> {
            assert!(amount > 0f32);
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn resizes_gray_down_and_up() {
        let source = gradient(10, 10, PixelLayout::Gray8);
        let mut scaler = Scaler::default();
        let small = scaler.resize(&source, ImageSize::new(3, 3)).unwrap();
        assert_eq!(small.as_bytes().len(), 9);
        assert_eq!(small.layout, PixelLayout::Gray8);
        let large = scaler.resize(&source, ImageSize::new(20, 20)).unwrap();
        assert_eq!(large.as_bytes().len(), 400);
    }

    #[test]
    fn small_target_is_rejected_without_progress() {
        let source = gradient(10, 10, PixelLayout::Gray8);
        let calls = Rc::new(RefCell::new(0usize));
        let counter = calls.clone();
        let mut scaler = Scaler::default();
        scaler.add_progress_listener(move |_: f32| *counter.borrow_mut() += 1);
        let result = scaler.resize(&source, ImageSize::new(2, 5));
        match result {
            Err(ResampleError::InvalidArgument { width, height }) => {
                assert_eq!((width, height), (2, 5));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn uniform_color_is_preserved() {
        let colors: [(PixelLayout, &[u8]); 3] = [
            (PixelLayout::Gray8, &[93]),
            (PixelLayout::Rgb8, &[10, 200, 77]),
            (PixelLayout::Rgba8, &[0, 128, 255, 60]),
        ];
        for function in ResamplingFunction::ALL {
            let mut scaler = Scaler::new(function);
            scaler.set_threading_policy(ThreadingPolicy::Fixed(3));
            for (layout, color) in colors {
                let data: Vec<u8> = color.iter().cycle().take(7 * 5 * color.len()).copied().collect();
                let source = ImageStore::from_slice(&data, 7, 5, layout).unwrap();
                for size in [
                    ImageSize::new(3, 3),
                    ImageSize::new(12, 9),
                    ImageSize::new(7, 5),
                    ImageSize::new(20, 4),
                ] {
                    let result = scaler.resize(&source, size).unwrap();
                    for pixel in result.as_bytes().chunks_exact(color.len()) {
                        assert_eq!(pixel, color, "{function} {layout:?} {size:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn thread_count_does_not_change_output() {
        let source = gradient(37, 23, PixelLayout::Rgb8);
        let mut single = Scaler::new(ResamplingFunction::Lanczos3);
        single.set_threading_policy(ThreadingPolicy::Single);
        let mut parallel = Scaler::new(ResamplingFunction::Lanczos3);
        parallel.set_threading_policy(ThreadingPolicy::Fixed(8));
        for size in [ImageSize::new(16, 41), ImageSize::new(5, 3)] {
            let a = single.resize(&source, size).unwrap();
            let b = parallel.resize(&source, size).unwrap();
            assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }

    #[test]
    fn progress_is_monotonic_and_completes() {
        let source = gradient(31, 17, PixelLayout::Rgba8);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(4));
        let id = scaler.add_progress_listener(move |fraction: f32| sink.borrow_mut().push(fraction));
        scaler.resize(&source, ImageSize::new(9, 40)).unwrap();
        {
            let seen = seen.borrow();
            assert!(!seen.is_empty());
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            assert!(seen.iter().all(|&f| f > 0f32 && f <= 1f32));
            assert_eq!(seen.last().copied(), Some(1f32));
        }
        assert!(scaler.remove_progress_listener(id));
        let before = seen.borrow().len();
        scaler.resize(&source, ImageSize::new(9, 40)).unwrap();
        assert_eq!(seen.borrow().len(), before);
    }

    #[test]
    fn channel_mismatch_leaves_destination_untouched() {
        let source = gradient(6, 6, PixelLayout::Gray8);
        let mut data = vec![0xABu8; 3 * 3 * 3];
        {
            let mut destination =
                ImageStoreMut::from_slice(&mut data, 3, 3, PixelLayout::Rgb8).unwrap();
            let mut scaler = Scaler::default();
            let result = scaler.resize_into(&source, ImageSize::new(3, 3), &mut destination);
            assert!(matches!(
                result,
                Err(ResampleError::ChannelMismatch {
                    source_channels: 1,
                    destination_channels: 3
                })
            ));
        }
        assert!(data.iter().all(|&v| v == 0xAB));
    }

    #[test]
    fn matching_destination_is_reused() {
        let source = gradient(8, 8, PixelLayout::Rgb8);
        let mut scaler = Scaler::default();
        let expected = scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        let mut data = vec![0u8; 4 * 4 * 3];
        {
            let mut destination =
                ImageStoreMut::from_slice(&mut data, 4, 4, PixelLayout::Rgb8).unwrap();
            scaler
                .resize_into(&source, ImageSize::new(4, 4), &mut destination)
                .unwrap();
        }
        assert_eq!(data.as_slice(), expected.as_bytes());
    }

    #[test]
    fn mismatched_destination_is_replaced() {
        let source = gradient(8, 8, PixelLayout::Gray8);
        let mut scaler = Scaler::default();
        let mut data = vec![0u8; 5 * 5];
        let mut destination =
            ImageStoreMut::from_slice(&mut data, 5, 5, PixelLayout::Gray8).unwrap();
        scaler
            .resize_into(&source, ImageSize::new(4, 6), &mut destination)
            .unwrap();
        assert_eq!(destination.get_size(), ImageSize::new(4, 6));
        assert_eq!(destination.as_bytes().len(), 24);
    }

    #[test]
    fn timeout_aborts_and_joins_workers() {
        let mut source = FaultySource::new(gradient(4, 4, PixelLayout::Gray8));
        source.slow_row = Some(1);
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        scaler.set_timeout(Duration::from_millis(20));
        let result = scaler.resize(&source, ImageSize::new(3, 3));
        match result {
            Err(ResampleError::TimeoutExceeded(limit)) => {
                assert_eq!(limit, Duration::from_millis(20))
            }
            other => panic!("unexpected {other:?}"),
        }
        let reads = source.reads.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(source.reads.load(Ordering::SeqCst), reads);
    }

    #[test]
    fn worker_failure_names_worker() {
        let mut source = FaultySource::new(gradient(6, 6, PixelLayout::Rgb8));
        source.failing_row = Some(1);
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        match scaler.resize(&source, ImageSize::new(3, 3)) {
            Err(ResampleError::WorkerFailure { worker, source }) => {
                assert_eq!(worker, 1);
                assert!(matches!(*source, ResampleError::PixelAccess(_)));
            }
            other => panic!("unexpected {other:?}"),
        }

        scaler.set_threading_policy(ThreadingPolicy::Single);
        assert!(matches!(
            scaler.resize(&source, ImageSize::new(3, 3)),
            Err(ResampleError::WorkerFailure { worker: 0, .. })
        ));
    }

    #[test]
    fn worker_panic_is_reported() {
        let mut source = FaultySource::new(gradient(6, 6, PixelLayout::Gray8));
        source.panicking_row = Some(2);
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(3));
        match scaler.resize(&source, ImageSize::new(4, 4)) {
            Err(ResampleError::WorkerFailure { worker, source }) => {
                assert_eq!(worker, 2);
                assert!(matches!(*source, ResampleError::WorkerPanicked(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cancellation_token_interrupts() {
        let source = gradient(16, 16, PixelLayout::Rgba8);
        let token = CancellationToken::new();
        token.cancel();
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        scaler.set_cancellation_token(Some(token));
        assert!(matches!(
            scaler.resize(&source, ImageSize::new(8, 8)),
            Err(ResampleError::Interrupted)
        ));
        scaler.set_cancellation_token(None);
        assert!(scaler.resize(&source, ImageSize::new(8, 8)).is_ok());
    }

    #[test]
    fn cancellation_while_workers_are_busy() {
        let mut source = FaultySource::new(gradient(8, 8, PixelLayout::Rgb8));
        source.slow_row = Some(1);
        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        scaler.set_cancellation_token(Some(token));
        let result = std::thread::scope(|scope| {
            scope.spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                canceller.cancel();
            });
            scaler.resize(&source, ImageSize::new(4, 4))
        });
        assert!(matches!(result, Err(ResampleError::Interrupted)));
        let reads = source.reads.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(source.reads.load(Ordering::SeqCst), reads);
    }

    #[test]
    fn timeout_does_not_apply_to_single_thread() {
        let mut source = FaultySource::new(gradient(6, 6, PixelLayout::Gray8));
        source.slow_row = Some(3);
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Single);
        scaler.set_timeout(Duration::from_millis(1));
        let result = scaler.resize(&source, ImageSize::new(3, 3)).unwrap();
        assert_eq!(result.as_bytes().len(), 9);
    }

    #[test]
    fn shared_pool_outlives_failed_job() {
        let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
        let mut source = FaultySource::new(gradient(9, 9, PixelLayout::Rgb8));
        source.failing_row = Some(4);
        let mut scaler = Scaler::default();
        scaler.set_threading_policy(ThreadingPolicy::Fixed(3));
        scaler.set_thread_pool(Some(pool.clone()));
        assert!(scaler.resize(&source, ImageSize::new(4, 4)).is_err());
        assert_eq!(pool.install(|| 21 * 2), 42);

        source.failing_row = None;
        let shared = scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        scaler.set_thread_pool(None);
        let owned = scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        assert_eq!(shared.as_bytes(), owned.as_bytes());
    }

    #[test]
    fn gray16_layout_is_kept() {
        let data: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let source = ImageStore::new(data, 8, 8, PixelLayout::Gray16).unwrap();
        let mut scaler = Scaler::new(ResamplingFunction::Bilinear);
        let result = scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        assert_eq!(result.layout, PixelLayout::Gray16);
        let wide = result.to_u16_plane();
        assert_eq!(wide.len(), 16);
        assert!(wide.iter().all(|&v| v % 257 == 0));
    }

    #[test]
    fn sharpener_runs_only_when_requested() {
        let source = gradient(8, 8, PixelLayout::Rgb8);
        let calls = Arc::new(AtomicUsize::new(0));
        let mut scaler = Scaler::default();
        scaler.set_sharpener(Box::new(CountingSharpener(calls.clone())));
        scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        scaler.set_unsharpen_mask(UnsharpenMask::Normal);
        scaler.resize(&source, ImageSize::new(4, 4)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn constrained_resize_fits_box() {
        let source = gradient(40, 20, PixelLayout::Gray8);
        let mut scaler = Scaler::new(ResamplingFunction::CatmullRom);
        let result = scaler
            .resize_constrained(
                &source,
                DimensionConstraint::FitWithin {
                    max_width: 10,
                    max_height: 10,
                    enlarge: false,
                },
            )
            .unwrap();
        assert_eq!(result.get_size(), ImageSize::new(10, 5));
    }

    #[test]
    fn custom_kernel_is_used() {
        fn nearest(x: f32) -> f32 {
            if x > -0.5f32 && x <= 0.5f32 { 1f32 } else { 0f32 }
        }
        let source = gradient(12, 12, PixelLayout::Gray8);
        let mut custom = Scaler::with_filter(ResamplingFilter::new(nearest, 0.5f32));
        let mut boxed = Scaler::new(ResamplingFunction::Box);
        let a = custom.resize(&source, ImageSize::new(24, 6)).unwrap();
        let b = boxed.resize(&source, ImageSize::new(24, 6)).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
