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
use std::fmt::{Debug, Formatter};

/// Receives the fraction of a resize job that is done, in `(0, 1]`.
///
/// Listeners are only ever called from the thread that invoked the resize.
pub trait ProgressListener {
    fn notify_progress(&mut self, fraction: f32);
}

impl<F: FnMut(f32)> ProgressListener for F {
    fn notify_progress(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Handle returned when a listener is registered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub(crate) struct ProgressListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn ProgressListener>)>,
}

impl ProgressListeners {
    pub(crate) fn add(&mut self, listener: Box<dyn ProgressListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn fire(&mut self, fraction: f32) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.notify_progress(fraction);
        }
    }
}

impl Debug for ProgressListeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = ProgressListeners::default();
        let first_calls = calls.clone();
        let first = listeners.add(Box::new(move |f: f32| first_calls.borrow_mut().push((1, f))));
        let second_calls = calls.clone();
        listeners.add(Box::new(move |f: f32| second_calls.borrow_mut().push((2, f))));

        listeners.fire(0.5f32);
        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        listeners.fire(1f32);

        assert_eq!(*calls.borrow(), vec![(1, 0.5f32), (2, 0.5f32), (2, 1f32)]);
    }
}
