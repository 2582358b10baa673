//! Request body construction.
//!
//! The device is byte-sensitive about these formats: attribute order and
//! the `Gabbo` sender tag are part of the protocol, so bodies are built
//! with plain string formatting rather than an XML writer.

use crate::wire::{Key, KeyState};

/// Body for one `/key` event.
pub fn key(key: Key, state: KeyState) -> String {
    format!(
        r#"<key state="{}" sender="Gabbo">{}</key>"#,
        state.as_wire(),
        key.as_wire()
    )
}

/// Body for an absolute `/volume` level.
pub fn volume(level: u8) -> String {
    format!("<volume>{level}</volume>")
}

/// Body for a `/select` request. `source_account` is sent even when
/// empty; the device requires the attribute.
pub fn select(source: &str, item_type: &str, source_account: &str, location: &str) -> String {
    format!(
        r#"<ContentItem source="{source}" type="{item_type}" sourceAccount="{source_account}" location="{location}"><itemName>Select using API</itemName></ContentItem>"#
    )
}

/// Body for `/setZone`: a new zone rooted at the master, identified to
/// the slaves by the sender IP.
pub fn create_zone(master_id: &str, sender_ip: &str, members: &[(String, String)]) -> String {
    let mut body = format!(r#"<zone master="{master_id}" senderIPAddress="{sender_ip}">"#);
    push_members(&mut body, members);
    body.push_str("</zone>");
    body
}

/// Body for `/addZoneSlave` and `/removeZoneSlave`.
pub fn alter_zone(master_id: &str, members: &[(String, String)]) -> String {
    let mut body = format!(r#"<zone master="{master_id}">"#);
    push_members(&mut body, members);
    body.push_str("</zone>");
    body
}

fn push_members(body: &mut String, members: &[(String, String)]) {
    for (ip, id) in members {
        body.push_str(&format!(r#"<member ipaddress="{ip}">{id}</member>"#));
    }
}
