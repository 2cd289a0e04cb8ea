use bytes::Bytes;
use std::cell::RefCell;
use std::io::{Cursor, Read};
use std::rc::Rc;

/// Cloneable readable handle over an in-memory request body.
///
/// Clones share a single cursor: bytes consumed through one handle are
/// consumed for all of them. This is what lets a request view hand out
/// the *same* stream on repeated accesses instead of re-wrapping the
/// bytes each time.
///
/// Not `Send`: request views are single-owner, sequential-use objects.
#[derive(Debug, Clone)]
pub struct BodyStream {
    inner: Rc<RefCell<Cursor<Bytes>>>,
}

impl BodyStream {
    pub fn new(body: Bytes) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Cursor::new(body))),
        }
    }

    /// Returns true if both handles share the same underlying cursor.
    pub fn same_stream(&self, other: &BodyStream) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Read for BodyStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.borrow_mut().read(buf)
    }
}
