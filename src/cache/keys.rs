/// 交通数据缓存键
pub const TRAFFIC_DATA_KEY: &str = "traffic_data";

/// 交通数据缓存过期时间（秒）
pub const TRAFFIC_CACHE_EXPIRE: u64 = 300; // 5分钟
