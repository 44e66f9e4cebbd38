//! Library registration.
//!
//! Registrations extend the interpreter beyond its standard libraries.
//! Each one is required the way Lua's own `luaL_requiref` does it: the
//! opener runs at most once per interpreter, its result is cached in the
//! loaded-modules table, and it is optionally bound to a global.

use core_types::{BridgeError, BridgeResult};
use mlua::{Lua, Table, Value};
use tracing::debug;

/// Native function that builds a library value, usually a table.
pub type LibraryOpener = fn(&Lua) -> mlua::Result<Value>;

/// A library to require when a context is created.
#[derive(Debug, Clone)]
pub struct LibraryRegistration {
    /// Module name
    pub name: String,
    /// Opener called when the module is not yet loaded
    pub open: LibraryOpener,
    /// Bind the module to a global of the same name
    pub global: bool,
}

impl LibraryRegistration {
    /// Registration that only populates the loaded-modules table.
    pub fn new(name: impl Into<String>, open: LibraryOpener) -> Self {
        Self {
            name: name.into(),
            open,
            global: false,
        }
    }

    /// Registration that is also exposed as a global.
    pub fn global(name: impl Into<String>, open: LibraryOpener) -> Self {
        Self {
            global: true,
            ..Self::new(name, open)
        }
    }
}

/// Requires every library in order.
pub(crate) fn register_all(lua: &Lua, libraries: &[LibraryRegistration]) -> BridgeResult<()> {
    for library in libraries {
        require(lua, library).map_err(|e| BridgeError::Library {
            name: library.name.clone(),
            message: e.to_string(),
        })?;
        debug!(name = %library.name, global = library.global, "library registered");
    }
    Ok(())
}

fn loaded_table(lua: &Lua) -> mlua::Result<Table> {
    if let Some(loaded) = lua.named_registry_value::<Option<Table>>("_LOADED")? {
        return Ok(loaded);
    }
    let loaded = lua.create_table()?;
    lua.set_named_registry_value("_LOADED", &loaded)?;
    Ok(loaded)
}

fn require(lua: &Lua, library: &LibraryRegistration) -> mlua::Result<()> {
    let loaded = loaded_table(lua)?;
    let module = match loaded.raw_get::<Value>(library.name.as_str())? {
        Value::Nil | Value::Boolean(false) => {
            let module = match (library.open)(lua)? {
                Value::Nil => Value::Boolean(true),
                module => module,
            };
            loaded.raw_set(library.name.as_str(), module.clone())?;
            module
        }
        module => module,
    };

    if library.global {
        lua.globals().set(library.name.as_str(), module)?;
    }
    Ok(())
}
