//! Locates `vkGetInstanceProcAddr` in the platform Vulkan runtime.

use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use ash::vk;
use tracing::{error, info};

#[cfg(target_os = "windows")]
const RUNTIME_CANDIDATES: &[&str] = &["vulkan-1.dll"];

#[cfg(all(unix, not(target_os = "macos")))]
const RUNTIME_CANDIDATES: &[&str] = &["libvulkan.so.1", "libvulkan.so"];

#[cfg(target_os = "macos")]
const RUNTIME_CANDIDATES: &[&str] = &[
    "libvulkan.1.dylib",
    "libvulkan.dylib",
    "libMoltenVK.dylib",
];

/// Opens the Vulkan runtime library and resolves `vkGetInstanceProcAddr`.
///
/// The library handle is intentionally leaked so the returned pointer stays
/// valid for the rest of the process.
pub fn load_entry() -> Result<vk::PFN_vkGetInstanceProcAddr> {
    for candidate in RUNTIME_CANDIDATES {
        let lib = match unsafe { libloading::Library::new(candidate) } {
            Ok(lib) => lib,
            Err(_) => continue,
        };
        let entry = unsafe {
            let sym: libloading::Symbol<vk::PFN_vkGetInstanceProcAddr> = lib
                .get(b"vkGetInstanceProcAddr")
                .with_context(|| format!("{candidate} exports no vkGetInstanceProcAddr"))?;
            *sym
        };
        // Keep the library loaded.
        std::mem::forget(lib);
        info!(runtime = candidate, "Vulkan runtime loaded");
        return Ok(entry);
    }
    bail!("no Vulkan runtime found (tried {RUNTIME_CANDIDATES:?})")
}

/// Process-wide cached resolver, loaded on first use.
///
/// Returns `None` when the Vulkan runtime is not present; the failure is
/// logged once and then remembered.
pub fn entry() -> Option<vk::PFN_vkGetInstanceProcAddr> {
    static ENTRY: OnceLock<Option<vk::PFN_vkGetInstanceProcAddr>> = OnceLock::new();
    *ENTRY.get_or_init(|| match load_entry() {
        Ok(resolver) => Some(resolver),
        Err(err) => {
            error!("failed to load the Vulkan runtime: {err:#}");
            None
        }
    })
}
