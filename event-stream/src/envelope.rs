use std::collections::HashMap;

/// Wire unit delivered to the destination topic: an opaque payload plus a
/// string attribute map carried as record headers. The payload is produced
/// upstream; this crate never inspects it.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub data: Vec<u8>,
    pub attributes: HashMap<String, String>,
}
