//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world: the file request service,
//! the bitmap cache, camera and map state, the render surface and
//! configuration.
//!
//! Overview
//! - `asynchandler` – background file resolution with generation-stamped bindings
//! - `battle` – battle condition read when enemy sprites are created
//! - `bitmapcache` – shared decoded bitmaps, chipset tiles and hue variants
//! - `debugmode` – presence toggles the sprite outline overlay
//! - `gameconfig` – INI backed configuration and sprite feature flags
//! - `gamemap` – chipset of the current map
//! - `gamescreen` – screen tone applied to battle sprites
//! - `input` – per-frame state of the demo keys
//! - `mode7camera` – tilted camera parameters
//! - `rendertarget` – GPU texture the surface is presented through
//! - `screensize` – internal render resolution
//! - `screensurface` – CPU surface sprites are composited into
//! - `spriteserial` – insertion order used to break z ties
//! - `windowsize` – OS window dimensions
pub mod asynchandler;
pub mod battle;
pub mod bitmapcache;
pub mod debugmode;
pub mod gameconfig;
pub mod gamemap;
pub mod gamescreen;
pub mod input;
pub mod mode7camera;
pub mod rendertarget;
pub mod screensize;
pub mod screensurface;
pub mod spriteserial;
pub mod windowsize;
