// Core error modeling shared by the library, server, and CLI.
pub mod error;
