pub mod generate;
pub mod helper;
pub mod init;
pub mod scan;
