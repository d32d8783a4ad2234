// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion handles.
//!
//! An [`AnimationHandle`] resolves once, when its animation reaches the end.
//! A cancelled animation leaves its handle abandoned: it stays pending
//! forever and its waker is dropped without being woken.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug)]
enum State {
    Pending(Option<Waker>),
    Resolved,
    Abandoned,
}

/// Completion of a single animation.
///
/// Handles are cheap to clone; every clone observes the same completion.
/// Awaiting one works on any executor.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    state: Rc<RefCell<State>>,
}

impl AnimationHandle {
    /// A pending handle and the completer that resolves it.
    pub(crate) fn pending() -> (Self, Completer) {
        let state = Rc::new(RefCell::new(State::Pending(None)));
        (
            Self {
                state: state.clone(),
            },
            Completer { state },
        )
    }

    /// A handle that is already resolved.
    pub(crate) fn resolved() -> Self {
        Self {
            state: Rc::new(RefCell::new(State::Resolved)),
        }
    }

    /// Whether the animation ran to completion.
    pub fn is_resolved(&self) -> bool {
        matches!(*self.state.borrow(), State::Resolved)
    }

    /// Whether the animation was cancelled or lost its node.
    pub fn is_abandoned(&self) -> bool {
        matches!(*self.state.borrow(), State::Abandoned)
    }

    /// Whether the animation is still in flight.
    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), State::Pending(_))
    }
}

impl Future for AnimationHandle {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match &mut *self.state.borrow_mut() {
            State::Resolved => Poll::Ready(()),
            State::Pending(waker) => {
                *waker = Some(cx.waker().clone());
                Poll::Pending
            }
            State::Abandoned => Poll::Pending,
        }
    }
}

/// Engine-side end of an [`AnimationHandle`].
///
/// Dropping it without calling [`Completer::resolve`] abandons the handle.
#[derive(Debug)]
pub(crate) struct Completer {
    state: Rc<RefCell<State>>,
}

impl Completer {
    pub(crate) fn resolve(self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), State::Resolved);
        if let State::Pending(Some(waker)) = previous {
            waker.wake();
        }
    }
}

impl Drop for Completer {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if matches!(*state, State::Pending(_)) {
            *state = State::Abandoned;
        }
    }
}

/// Completion of a batch of animations, resolved when all of them are.
///
/// If any member is abandoned the group never resolves.
#[derive(Clone, Debug, Default)]
pub struct GroupHandle {
    parts: Vec<AnimationHandle>,
}

impl GroupHandle {
    /// Group over `parts`. An empty group is resolved.
    pub fn new(parts: Vec<AnimationHandle>) -> Self {
        Self { parts }
    }

    /// Member handles.
    pub fn parts(&self) -> &[AnimationHandle] {
        &self.parts
    }

    /// Whether every member ran to completion.
    pub fn is_resolved(&self) -> bool {
        self.parts.iter().all(AnimationHandle::is_resolved)
    }
}

impl Future for GroupHandle {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut ready = true;
        for part in &mut self.parts {
            ready &= Pin::new(part).poll(cx).is_ready();
        }
        if ready { Poll::Ready(()) } else { Poll::Pending }
    }
}
