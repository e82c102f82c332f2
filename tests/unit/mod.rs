mod subscription_api;
