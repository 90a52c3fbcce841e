//! The process-wide extension cache and the ABI-fixed trampolines.
//!
//! The trampoline names and signatures are dictated by the Vulkan
//! specification: callers link against the standard entry point names and
//! expect the standard `VKAPI_CALL` convention, so the symbols below are
//! exported unmangled. Internally each trampoline is a pass-through to the
//! pointer cached by the last initialization.
//!
//! A trampoline whose slot is absent does not call through null. It logs an
//! error and, where the signature has a `VkResult`, reports
//! `VK_ERROR_EXTENSION_NOT_PRESENT`; void trampolines become no-ops.

#![allow(non_snake_case)]

use ash::vk;
use parking_lot::RwLock;
use tracing::{error, info};

use crate::loader;
use crate::table::ExtensionTable;

static EXTENSIONS: RwLock<ExtensionTable> = RwLock::new(ExtensionTable::empty());

/// Snapshot of the current process-wide table.
pub fn extensions() -> ExtensionTable {
    *EXTENSIONS.read()
}

/// Whether the debug-utils messenger entry points are currently resolved.
pub fn debug_utils_messenger_available() -> bool {
    EXTENSIONS.read().supports_debug_utils_messenger()
}

/// Whether `vkCmdPushDescriptorSetKHR` is currently resolved.
pub fn push_descriptor_available() -> bool {
    EXTENSIONS.read().supports_push_descriptor()
}

/// Resolves the known extension entry points through `resolver` and makes
/// them current for the whole process.
///
/// Calling this again for another instance replaces the table wholesale;
/// the last writer wins and nothing is merged.
///
/// # Safety
///
/// Same contract as [`ExtensionTable::load`]. Pointers resolved here are
/// invalidated when `instance` is destroyed; nothing in this crate notices.
pub unsafe fn load_with(resolver: vk::PFN_vkGetInstanceProcAddr, instance: vk::Instance) {
    let table = unsafe { ExtensionTable::load(resolver, instance) };
    info!(
        debug_utils = table.supports_debug_utils_messenger(),
        push_descriptor = table.supports_push_descriptor(),
        "Vulkan extension entry points cached"
    );
    *EXTENSIONS.write() = table;
}

/// Resolves the known extension entry points for `instance` through the
/// platform Vulkan runtime and caches them process-wide.
///
/// No failure signal: if the runtime itself cannot be loaded, the error is
/// logged and every slot is left absent.
///
/// # Safety
///
/// `instance` must be a valid `VkInstance` created by the same Vulkan
/// runtime this process loaded.
#[no_mangle]
pub unsafe extern "C" fn load_vk_extensions(instance: vk::Instance) {
    match loader::entry() {
        Some(resolver) => unsafe { load_with(resolver, instance) },
        None => *EXTENSIONS.write() = ExtensionTable::empty(),
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkCreateDebugUtilsMessengerEXT(
    instance: vk::Instance,
    p_create_info: *const vk::DebugUtilsMessengerCreateInfoEXT<'_>,
    p_allocator: *const vk::AllocationCallbacks<'_>,
    p_messenger: *mut vk::DebugUtilsMessengerEXT,
) -> vk::Result {
    let pfn = EXTENSIONS.read().create_debug_utils_messenger;
    match pfn {
        Some(f) => unsafe { f(instance, p_create_info, p_allocator, p_messenger) },
        None => {
            error!("vkCreateDebugUtilsMessengerEXT is not resolved; was load_vk_extensions called?");
            vk::Result::ERROR_EXTENSION_NOT_PRESENT
        }
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkDestroyDebugUtilsMessengerEXT(
    instance: vk::Instance,
    messenger: vk::DebugUtilsMessengerEXT,
    p_allocator: *const vk::AllocationCallbacks<'_>,
) {
    let pfn = EXTENSIONS.read().destroy_debug_utils_messenger;
    match pfn {
        Some(f) => unsafe { f(instance, messenger, p_allocator) },
        None => {
            error!("vkDestroyDebugUtilsMessengerEXT is not resolved; was load_vk_extensions called?");
        }
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkCmdPushDescriptorSetKHR(
    command_buffer: vk::CommandBuffer,
    pipeline_bind_point: vk::PipelineBindPoint,
    layout: vk::PipelineLayout,
    set: u32,
    descriptor_write_count: u32,
    p_descriptor_writes: *const vk::WriteDescriptorSet<'_>,
) {
    let pfn = EXTENSIONS.read().cmd_push_descriptor_set;
    match pfn {
        Some(f) => unsafe {
            f(
                command_buffer,
                pipeline_bind_point,
                layout,
                set,
                descriptor_write_count,
                p_descriptor_writes,
            )
        },
        None => {
            error!("vkCmdPushDescriptorSetKHR is not resolved; was load_vk_extensions called?");
        }
    }
}
