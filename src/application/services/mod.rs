pub mod subscription_service;
