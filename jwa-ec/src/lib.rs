#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Layout
//!
//! - [`curve`]: JOSE curve identifiers and their domain parameters
//! - [`point`]: fixed-width coordinate encoding and the curve membership test
//! - [`jwk`]: EC public JWK import/export
//! - [`ecdsa`]: the `ES256`/`ES384`/`ES512` signature algorithms, with
//!   [`ecdsa::der`] handling signature transcoding
//! - [`engine`]: the signing/verification backend and key factory seams
//! - [`config`]: the legacy DER signature toggle

pub mod config;
pub mod curve;
pub mod ecdsa;
pub mod engine;
pub mod jwk;
pub mod key;
pub mod point;

mod error;

pub use crate::{
    config::Config,
    curve::{CurveId, CurveParameters},
    error::{Error, Result},
    jwk::{EcJwkFactory, EcPublicJwk},
    key::{EcKey, EcPrivateKey, EcPublicKey, Key},
    point::AffinePoint,
};
pub use elliptic_curve::bigint::U576;
