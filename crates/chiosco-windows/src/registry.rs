//! Registry-backed policy store over the HKCU hive.
//!
//! All coordinates live under `HKEY_CURRENT_USER`, so no elevation is
//! needed to open the hive itself; the policy paths are protected by
//! the shell, not by key ACLs.

use chiosco_core::error::PolicyError;
use chiosco_core::store::{PolicyStore, PolicyValue};

#[cfg(windows)]
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
#[cfg(windows)]
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_DWORD, REG_OPTION_NON_VOLATILE,
    REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE, RegCloseKey, RegCreateKeyExW, RegDeleteValueW,
    RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
};
#[cfg(windows)]
use windows::core::PCWSTR;

/// [`PolicyStore`] implementation over the current user's registry.
///
/// Stateless: every call opens the key it needs and closes it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryPolicyStore;

impl RegistryPolicyStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl PolicyStore for RegistryPolicyStore {
    fn get(&self, path: &str, name: &str) -> Result<Option<PolicyValue>, PolicyError> {
        let Some(key) = open_key(path, KEY_QUERY_VALUE)? else {
            // Missing path means the value was never written.
            return Ok(None);
        };
        let wide_name = wide(name);

        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        // SAFETY: RegQueryValueExW with a null data buffer only reports
        // the value's kind and byte size.
        let status = unsafe {
            RegQueryValueExW(
                key.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind),
                None,
                Some(&mut size),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status.is_err() {
            return Err(read_error(path, name, status));
        }

        if kind == REG_DWORD {
            let mut data = [0u8; 4];
            let mut len = data.len() as u32;
            // SAFETY: the buffer is 4 bytes and len tells the API so;
            // a DWORD value always fits.
            let status = unsafe {
                RegQueryValueExW(
                    key.0,
                    PCWSTR(wide_name.as_ptr()),
                    None,
                    None,
                    Some(data.as_mut_ptr()),
                    Some(&mut len),
                )
            };
            if status.is_err() {
                return Err(read_error(path, name, status));
            }
            if len as usize != data.len() {
                return Err(PolicyError::ReadValue {
                    path: path.to_string(),
                    name: name.to_string(),
                    detail: format!("unexpected DWORD length {len}"),
                });
            }
            Ok(Some(PolicyValue::Dword(u32::from_le_bytes(data))))
        } else if kind == REG_SZ {
            let mut buffer = vec![0u8; size as usize];
            let mut len = size;
            // SAFETY: the buffer was sized by the query above; len is
            // updated to the bytes actually copied.
            let status = unsafe {
                RegQueryValueExW(
                    key.0,
                    PCWSTR(wide_name.as_ptr()),
                    None,
                    None,
                    Some(buffer.as_mut_ptr()),
                    Some(&mut len),
                )
            };
            if status.is_err() {
                return Err(read_error(path, name, status));
            }
            let wide_chars: Vec<u16> = buffer[..len as usize]
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            let text = String::from_utf16_lossy(&wide_chars)
                .trim_end_matches('\0')
                .to_string();
            Ok(Some(PolicyValue::Text(text)))
        } else {
            Err(PolicyError::ReadValue {
                path: path.to_string(),
                name: name.to_string(),
                detail: format!("unsupported value kind {kind:?}"),
            })
        }
    }

    fn set(&mut self, path: &str, name: &str, value: &PolicyValue) -> Result<(), PolicyError> {
        let key = create_key(path)?;
        let wide_name = wide(name);

        let status = match value {
            PolicyValue::Dword(dword) => {
                // SAFETY: RegSetValueExW receives the 4 little-endian
                // bytes of the DWORD, matching REG_DWORD.
                unsafe {
                    RegSetValueExW(
                        key.0,
                        PCWSTR(wide_name.as_ptr()),
                        None,
                        REG_DWORD,
                        Some(&dword.to_le_bytes()),
                    )
                }
            }
            PolicyValue::Text(text) => {
                let wide_value = wide(text);
                // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the
                // layout is contiguous and we compute the correct byte
                // length, terminator included.
                let bytes: &[u8] = unsafe {
                    std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2)
                };
                // SAFETY: RegSetValueExW with REG_SZ expects exactly
                // these nul-terminated wide-string bytes.
                unsafe {
                    RegSetValueExW(key.0, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes))
                }
            }
        };
        if status.is_err() {
            return Err(PolicyError::WriteValue {
                path: path.to_string(),
                name: name.to_string(),
                detail: format!("{status:?}"),
            });
        }
        chiosco_core::log_debug!("registry: wrote {kind} '{name}' under '{path}'", kind = value.kind());
        Ok(())
    }

    fn delete(&mut self, path: &str, name: &str) -> Result<(), PolicyError> {
        let Some(key) = open_key(path, KEY_SET_VALUE)? else {
            return Ok(());
        };
        let wide_name = wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(key.0, PCWSTR(wide_name.as_ptr())) };
        if status.is_err() {
            // A missing value is already deleted.
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(());
            }
            return Err(PolicyError::DeleteValue {
                path: path.to_string(),
                name: name.to_string(),
                detail: format!("{status:?}"),
            });
        }
        chiosco_core::log_debug!("registry: deleted '{name}' under '{path}'");
        Ok(())
    }
}

#[cfg(not(windows))]
impl PolicyStore for RegistryPolicyStore {
    fn get(&self, _path: &str, _name: &str) -> Result<Option<PolicyValue>, PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "registry access",
        })
    }

    fn set(&mut self, _path: &str, _name: &str, _value: &PolicyValue) -> Result<(), PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "registry access",
        })
    }

    fn delete(&mut self, _path: &str, _name: &str) -> Result<(), PolicyError> {
        Err(PolicyError::Unsupported {
            operation: "registry access",
        })
    }
}

/// Null-terminated UTF-16 rendering for Win32 string parameters.
#[cfg(windows)]
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Closes the wrapped key when dropped.
#[cfg(windows)]
struct KeyGuard(HKEY);

#[cfg(windows)]
impl Drop for KeyGuard {
    fn drop(&mut self) {
        // SAFETY: RegCloseKey is safe to call on any valid HKEY.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Opens an existing HKCU subkey. Returns `Ok(None)` when the path
/// does not exist.
#[cfg(windows)]
fn open_key(path: &str, access: REG_SAM_FLAGS) -> Result<Option<KeyGuard>, PolicyError> {
    let wide_path = wide(path);
    let mut key = HKEY::default();
    // SAFETY: RegOpenKeyExW is a standard Win32 registry API. We pass
    // valid pointers and the guard closes the key after use.
    let status = unsafe {
        RegOpenKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(wide_path.as_ptr()),
            None,
            access,
            &mut key,
        )
    };
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    if status.is_err() {
        return Err(PolicyError::OpenPath {
            path: path.to_string(),
            detail: format!("{status:?}"),
        });
    }
    Ok(Some(KeyGuard(key)))
}

/// Opens an HKCU subkey for writing, creating missing path segments.
#[cfg(windows)]
fn create_key(path: &str) -> Result<KeyGuard, PolicyError> {
    let wide_path = wide(path);
    let mut key = HKEY::default();
    // SAFETY: RegCreateKeyExW is a standard Win32 registry API. We pass
    // valid pointers and the guard closes the key after use.
    let status = unsafe {
        RegCreateKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(wide_path.as_ptr()),
            None,
            None,
            REG_OPTION_NON_VOLATILE,
            KEY_SET_VALUE,
            None,
            &mut key,
            None,
        )
    };
    if status.is_err() {
        return Err(PolicyError::OpenPath {
            path: path.to_string(),
            detail: format!("{status:?}"),
        });
    }
    Ok(KeyGuard(key))
}

#[cfg(windows)]
fn read_error(path: &str, name: &str, status: WIN32_ERROR) -> PolicyError {
    PolicyError::ReadValue {
        path: path.to_string(),
        name: name.to_string(),
        detail: format!("{status:?}"),
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_registry_access_as_unsupported() {
        let mut store = RegistryPolicyStore::new();

        let err = store.get(r"Software\Test", "Flag").unwrap_err();
        assert_eq!(
            err,
            PolicyError::Unsupported {
                operation: "registry access"
            }
        );

        assert!(store.set(r"Software\Test", "Flag", &PolicyValue::Dword(1)).is_err());
        assert!(store.delete(r"Software\Test", "Flag").is_err());
    }
}
