//! Contract for the external record-mapping collaborator.

use crate::value::Value;

/// An ordered (column, value) view of a record, consumed by
/// [`InsertStmt::record`](crate::InsertStmt::record) and
/// [`UpdateStmt::set_record`](crate::UpdateStmt::set_record).
///
/// Producing these pairs is the mapping layer's concern: by convention column
/// names default to a case transform of the field name, individual fields can
/// override their column, and excluded fields are simply omitted from the
/// returned sequence. A derive macro or a hand-written impl both work; this
/// crate only consumes the pairs in the order given.
pub trait Record {
    /// The (column, value) pairs of this record, in rendering order.
    fn fields(&self) -> Vec<(String, Value)>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Vec<(String, Value)> {
        (**self).fields()
    }
}
