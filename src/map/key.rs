use crate::{plan::PlanNode, value::Value};

/// Computes a node's composite identity key for the current row: the
/// parent's key followed by the raw values at the node's identity columns.
///
/// Returns `None` when every identity column is null, which callers treat
/// as "this node is absent from the row".
pub(super) fn identity_key(node: &PlanNode, row: &[Value], parent: &[u8]) -> Option<Vec<u8>> {
    if node.identity.iter().all(|&column| row[column].is_null()) {
        return None;
    }

    let mut key = Vec::with_capacity(parent.len() + node.identity.len() * 9);
    key.extend_from_slice(parent);
    for &column in &node.identity {
        encode(&mut key, &row[column]);
    }
    Some(key)
}

/// Tagged, length-prefixed encoding: no delimiter can collide with data,
/// and null is distinct from every value.
fn encode(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.push(b'n'),
        Value::Bool(v) => {
            buf.push(b'b');
            buf.push(*v as u8);
        }
        Value::I64(v) => {
            buf.push(b'i');
            buf.extend_from_slice(&v.to_be_bytes());
        }
        Value::F64(v) => {
            buf.push(b'f');
            buf.extend_from_slice(&v.to_bits().to_be_bytes());
        }
        Value::String(v) => {
            buf.push(b's');
            buf.extend_from_slice(&(v.len() as u64).to_be_bytes());
            buf.extend_from_slice(v.as_bytes());
        }
        Value::Timestamp(v) => {
            buf.push(b't');
            buf.extend_from_slice(&v.seconds.to_be_bytes());
            buf.extend_from_slice(&v.nanos.to_be_bytes());
        }
        // raw rows never carry trees
        Value::Record(_) | Value::List(_) => {
            debug_assert!(false, "record value in a raw row");
            buf.push(b'x');
        }
    }
}
