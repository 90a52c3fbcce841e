//! The resolved-capability table for optional Vulkan extension entry points.
//!
//! Extension commands are not exported by the Vulkan loader; they have to be
//! looked up at runtime through `vkGetInstanceProcAddr` against a live
//! instance. [`ExtensionTable`] performs that lookup once for a fixed, known
//! set of entry points and keeps the results as optional function pointers,
//! so callers can branch on availability instead of calling through null.

use std::ffi::CStr;

use ash::vk;
use tracing::debug;

/// Entry point of VK_EXT_debug_utils.
pub const CREATE_DEBUG_UTILS_MESSENGER: &CStr = c"vkCreateDebugUtilsMessengerEXT";
/// Entry point of VK_EXT_debug_utils.
pub const DESTROY_DEBUG_UTILS_MESSENGER: &CStr = c"vkDestroyDebugUtilsMessengerEXT";
/// Entry point of VK_KHR_push_descriptor.
pub const CMD_PUSH_DESCRIPTOR_SET: &CStr = c"vkCmdPushDescriptorSetKHR";

/// Resolved extension entry points for one Vulkan instance.
///
/// A `None` slot means the driver did not expose that entry point, either
/// because the extension was not enabled on the instance or because the
/// implementation does not support it at all. The table is a plain bundle of
/// function pointers; it stays valid only as long as the instance it was
/// loaded against.
#[derive(Clone, Copy, Default)]
pub struct ExtensionTable {
    pub create_debug_utils_messenger: Option<vk::PFN_vkCreateDebugUtilsMessengerEXT>,
    pub destroy_debug_utils_messenger: Option<vk::PFN_vkDestroyDebugUtilsMessengerEXT>,
    pub cmd_push_descriptor_set: Option<vk::PFN_vkCmdPushDescriptorSetKHR>,
}

impl ExtensionTable {
    /// A table with every slot absent.
    pub const fn empty() -> Self {
        Self {
            create_debug_utils_messenger: None,
            destroy_debug_utils_messenger: None,
            cmd_push_descriptor_set: None,
        }
    }

    /// Resolves every known entry point through `resolver`.
    ///
    /// A name the driver does not know leaves its slot `None`; the remaining
    /// lookups still run. The call itself cannot fail.
    ///
    /// # Safety
    ///
    /// `resolver` must behave like `vkGetInstanceProcAddr` and `instance`
    /// must be a handle `resolver` accepts (a valid instance, or null if the
    /// resolver tolerates it).
    pub unsafe fn load(
        resolver: vk::PFN_vkGetInstanceProcAddr,
        instance: vk::Instance,
    ) -> Self {
        Self {
            create_debug_utils_messenger: unsafe {
                resolve(resolver, instance, CREATE_DEBUG_UTILS_MESSENGER)
            }
            .map(|f| unsafe { std::mem::transmute(f) }),
            destroy_debug_utils_messenger: unsafe {
                resolve(resolver, instance, DESTROY_DEBUG_UTILS_MESSENGER)
            }
            .map(|f| unsafe { std::mem::transmute(f) }),
            cmd_push_descriptor_set: unsafe {
                resolve(resolver, instance, CMD_PUSH_DESCRIPTOR_SET)
            }
            .map(|f| unsafe { std::mem::transmute(f) }),
        }
    }

    /// Both VK_EXT_debug_utils messenger entry points resolved.
    pub fn supports_debug_utils_messenger(&self) -> bool {
        self.create_debug_utils_messenger.is_some()
            && self.destroy_debug_utils_messenger.is_some()
    }

    /// The VK_KHR_push_descriptor recording entry point resolved.
    pub fn supports_push_descriptor(&self) -> bool {
        self.cmd_push_descriptor_set.is_some()
    }
}

unsafe fn resolve(
    resolver: vk::PFN_vkGetInstanceProcAddr,
    instance: vk::Instance,
    name: &CStr,
) -> vk::PFN_vkVoidFunction {
    let pfn = unsafe { resolver(instance, name.as_ptr()) };
    if pfn.is_none() {
        debug!(entry_point = %name.to_string_lossy(), "not exposed by the driver");
    }
    pfn
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_char;
    use std::sync::Mutex;

    static SEEN_NAMES: Mutex<Vec<String>> = Mutex::new(Vec::new());

    unsafe extern "system" fn stub_create(
        _instance: vk::Instance,
        _p_create_info: *const vk::DebugUtilsMessengerCreateInfoEXT<'_>,
        _p_allocator: *const vk::AllocationCallbacks<'_>,
        _p_messenger: *mut vk::DebugUtilsMessengerEXT,
    ) -> vk::Result {
        vk::Result::SUCCESS
    }

    unsafe extern "system" fn stub_destroy(
        _instance: vk::Instance,
        _messenger: vk::DebugUtilsMessengerEXT,
        _p_allocator: *const vk::AllocationCallbacks<'_>,
    ) {
    }

    unsafe extern "system" fn stub_push(
        _command_buffer: vk::CommandBuffer,
        _pipeline_bind_point: vk::PipelineBindPoint,
        _layout: vk::PipelineLayout,
        _set: u32,
        _descriptor_write_count: u32,
        _p_descriptor_writes: *const vk::WriteDescriptorSet<'_>,
    ) {
    }

    unsafe extern "system" fn resolver_full(
        _instance: vk::Instance,
        name: *const c_char,
    ) -> vk::PFN_vkVoidFunction {
        let name = unsafe { CStr::from_ptr(name) };
        SEEN_NAMES
            .lock()
            .unwrap()
            .push(name.to_string_lossy().into_owned());
        if name == CREATE_DEBUG_UTILS_MESSENGER {
            Some(unsafe {
                std::mem::transmute::<vk::PFN_vkCreateDebugUtilsMessengerEXT, _>(stub_create)
            })
        } else if name == DESTROY_DEBUG_UTILS_MESSENGER {
            Some(unsafe {
                std::mem::transmute::<vk::PFN_vkDestroyDebugUtilsMessengerEXT, _>(stub_destroy)
            })
        } else if name == CMD_PUSH_DESCRIPTOR_SET {
            Some(unsafe {
                std::mem::transmute::<vk::PFN_vkCmdPushDescriptorSetKHR, _>(stub_push)
            })
        } else {
            None
        }
    }

    unsafe extern "system" fn resolver_no_debug_utils(
        instance: vk::Instance,
        name: *const c_char,
    ) -> vk::PFN_vkVoidFunction {
        let cname = unsafe { CStr::from_ptr(name) };
        if cname == CREATE_DEBUG_UTILS_MESSENGER || cname == DESTROY_DEBUG_UTILS_MESSENGER {
            None
        } else {
            unsafe { resolver_full(instance, name) }
        }
    }

    #[test]
    fn test_load_resolves_every_known_entry_point() {
        SEEN_NAMES.lock().unwrap().clear();
        let table =
            unsafe { ExtensionTable::load(resolver_full, vk::Instance::null()) };

        let create: vk::PFN_vkCreateDebugUtilsMessengerEXT = stub_create;
        let destroy: vk::PFN_vkDestroyDebugUtilsMessengerEXT = stub_destroy;
        let push: vk::PFN_vkCmdPushDescriptorSetKHR = stub_push;
        assert_eq!(
            table.create_debug_utils_messenger.map(|f| f as usize),
            Some(create as usize)
        );
        assert_eq!(
            table.destroy_debug_utils_messenger.map(|f| f as usize),
            Some(destroy as usize)
        );
        assert_eq!(
            table.cmd_push_descriptor_set.map(|f| f as usize),
            Some(push as usize)
        );
        assert!(table.supports_debug_utils_messenger());
        assert!(table.supports_push_descriptor());

        // The resolver must see the exact standard name strings.
        let seen = SEEN_NAMES.lock().unwrap();
        assert!(seen.contains(&"vkCreateDebugUtilsMessengerEXT".to_string()));
        assert!(seen.contains(&"vkDestroyDebugUtilsMessengerEXT".to_string()));
        assert!(seen.contains(&"vkCmdPushDescriptorSetKHR".to_string()));
    }

    #[test]
    fn test_unsupported_entry_point_stays_absent_without_aborting_the_rest() {
        let table = unsafe {
            ExtensionTable::load(resolver_no_debug_utils, vk::Instance::null())
        };
        assert!(table.create_debug_utils_messenger.is_none());
        assert!(!table.supports_debug_utils_messenger());
        // The debug-utils misses come first in the lookup order; the
        // push-descriptor lookup after them still ran.
        assert!(table.supports_push_descriptor());
    }

    #[test]
    fn test_empty_table_has_no_capabilities() {
        let table = ExtensionTable::empty();
        assert!(!table.supports_debug_utils_messenger());
        assert!(!table.supports_push_descriptor());
    }
}
