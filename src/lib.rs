//! # Vulkan Extension Forwarder
//!
//! A small shim that resolves a fixed set of optional Vulkan extension entry
//! points (`VK_EXT_debug_utils` messengers, `VK_KHR_push_descriptor`) through
//! `vkGetInstanceProcAddr` at instance-creation time and re-exposes them as
//! the standard, unmangled Vulkan symbols. Callers link against the usual
//! names and never see the dynamic lookup.
//!
//! Call [`load_vk_extensions`] once, right after creating the instance, then
//! use the extension entry points as if they were core. Availability can be
//! checked through [`debug_utils_messenger_available`] and
//! [`push_descriptor_available`] instead of finding out from a failed call.
//!
//! The cached pointers belong to the instance they were resolved against.
//! Loading again for another instance replaces them (last writer wins), and
//! destroying the instance invalidates them without notice.

pub mod abi;
pub mod loader;
pub mod table;

pub use abi::{
    debug_utils_messenger_available, extensions, load_vk_extensions, load_with,
    push_descriptor_available, vkCmdPushDescriptorSetKHR, vkCreateDebugUtilsMessengerEXT,
    vkDestroyDebugUtilsMessengerEXT,
};
pub use table::ExtensionTable;

pub use ash::vk;
