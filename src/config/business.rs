//! Business identity printed on every invoice header.
//!
//! The desk serves a single shop, so the identity is compiled in rather than read from
//! `config.toml`.

use serde::Serialize;

/// Seller details shown in the invoice header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessProfile {
    /// Trading name
    pub name: &'static str,
    /// Shop address
    pub address: &'static str,
    /// Shop phone number
    pub phone: &'static str,
    /// GST registration number
    pub tax_id: &'static str,
    /// State and GST state code line
    pub state: &'static str,
    /// Shop email
    pub email: &'static str,
}

/// The shop this desk is built for.
pub const YASH_HOME_DECORS: BusinessProfile = BusinessProfile {
    name: "Yash Home Decors",
    address: "#174, Pycrofts Road, Royapettah, Chennai - 600014",
    phone: "+91-95000-05914",
    tax_id: "33CJWPM2113B1ZJ",
    state: "Tamil Nadu, Code: 33",
    email: "yashdecoratives@gmail.com",
};
