//! Bounded order queue shared between order producers and motion control

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use heapless::Deque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Internal
use super::ORDER_QUEUE_CAPACITY;
use comms_if::tc::TrajOrder;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

type Orders = Deque<TrajOrder, ORDER_QUEUE_CAPACITY>;

/// The consumer end of the order queue, owned by motion control.
#[derive(Debug, Default)]
pub struct OrderQueue {
    orders: Arc<Mutex<Orders>>,
}

/// A producer handle on the order queue. Cheap to clone and may be sent to
/// other threads.
#[derive(Debug, Clone)]
pub struct OrderSender {
    orders: Arc<Mutex<Orders>>,
}

/// The queue already holds `ORDER_QUEUE_CAPACITY` orders. The rejected order
/// is handed back.
#[derive(Debug, thiserror::Error)]
#[error("The order queue is full, {} order rejected", .0.name())]
pub struct QueueFull(pub TrajOrder);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a new producer handle on this queue.
    pub fn sender(&self) -> OrderSender {
        OrderSender {
            orders: self.orders.clone(),
        }
    }

    /// Add an order to the back of the queue.
    pub fn push(&self, order: TrajOrder) -> Result<(), QueueFull> {
        push(&self.orders, order)
    }

    /// Take the order at the front of the queue, if any. Never blocks on an
    /// empty queue.
    pub fn pop(&self) -> Option<TrajOrder> {
        lock(&self.orders).pop_front()
    }

    pub fn len(&self) -> usize {
        lock(&self.orders).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.orders).is_empty()
    }

    /// Drop every queued order.
    pub fn clear(&self) {
        lock(&self.orders).clear();
    }
}

impl OrderSender {
    /// Add an order to the back of the queue.
    pub fn submit(&self, order: TrajOrder) -> Result<(), QueueFull> {
        push(&self.orders, order)
    }
}

impl QueueFull {
    /// Take back the rejected order.
    pub fn into_order(self) -> TrajOrder {
        self.0
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Lock the queue, taking over a poisoned lock.
fn lock(orders: &Mutex<Orders>) -> MutexGuard<'_, Orders> {
    orders.lock().unwrap_or_else(PoisonError::into_inner)
}

fn push(orders: &Mutex<Orders>, order: TrajOrder) -> Result<(), QueueFull> {
    lock(orders).push_back(order).map_err(QueueFull)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn go(distance_m: f64) -> TrajOrder {
        TrajOrder::GoLinear { distance_m }
    }

    #[test]
    fn test_fifo_and_capacity() {
        let queue = OrderQueue::new();

        for i in 0..ORDER_QUEUE_CAPACITY {
            queue.push(go(i as f64)).unwrap();
        }

        let rejected = queue.push(go(99.0)).unwrap_err();
        assert_eq!(rejected.into_order(), go(99.0));
        assert_eq!(queue.len(), ORDER_QUEUE_CAPACITY);

        assert_eq!(queue.pop(), Some(go(0.0)));
        assert_eq!(queue.pop(), Some(go(1.0)));
        assert_eq!(queue.len(), ORDER_QUEUE_CAPACITY - 2);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_senders_from_threads() {
        let queue = OrderQueue::new();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sender = queue.sender();
                thread::spawn(move || {
                    (0..5).filter(|_| sender.submit(TrajOrder::Stop).is_ok()).count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(accepted, ORDER_QUEUE_CAPACITY);
        assert_eq!(queue.len(), ORDER_QUEUE_CAPACITY);
    }
}
