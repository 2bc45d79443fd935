pub mod author_service;
