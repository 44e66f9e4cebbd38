//! Default `__trycall` dispatcher.
//!
//! Scripts normally define their own trampoline. When
//! [`ContextConfig::default_trampoline`](crate::ContextConfig) is set this
//! one is installed before the priming run, so a script can still replace
//! it.
//!
//! Return convention:
//! - a table is returned unchanged
//! - `nil` or no value becomes an empty table
//! - anything else becomes `{ result = tostring(value) }`

use core_types::{limits::TRAMPOLINE_NAME, BridgeError, BridgeResult};
use mlua::Lua;

/// Lua source of the default trampoline.
///
/// The target receives the arguments table as its only parameter.
pub const DEFAULT_TRAMPOLINE: &str = r#"
function __trycall(name, args)
    local target = _G[name]
    if type(target) ~= "function" then
        error("attempt to call a " .. type(target) .. " value (function '" .. tostring(name) .. "')", 0)
    end
    local result = target(args)
    if type(result) == "table" then
        return result
    elseif result == nil then
        return {}
    end
    return { result = tostring(result) }
end
"#;

pub(crate) fn install(lua: &Lua) -> BridgeResult<()> {
    let chunk_name = format!("={TRAMPOLINE_NAME}");
    lua.load(DEFAULT_TRAMPOLINE)
        .set_name(chunk_name.clone())
        .exec()
        .map_err(|e| BridgeError::Load {
            chunk: chunk_name,
            message: e.to_string(),
        })
}
