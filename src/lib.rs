//! # medref: clinical reference data layer
//!
//! Bundled, read-only reference datasets (CPT/HCPCS codes, medical
//! terminology, clinical phrases, scoring charts, lab tests) and the page
//! views a marketing site builds over them.
//!
//! ## Architecture
//!
//! - **[`config`]**: Configuration loading and validation
//! - **[`data`]**: Embedded datasets, lookup, search and facet filtering
//! - **[`pagination`]**: Fixed-size page windows
//! - **[`pages`]**: Routes, listing state, detail views, metadata, clipboard
//! - **[`demo`]**: Timer-driven product demo scene cycles
//! - **[`sitemap`]**: XML sitemap generation

pub mod config;
pub mod data;
pub mod demo;
pub mod pages;
pub mod pagination;
pub mod sitemap;
