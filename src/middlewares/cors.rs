use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // 现场终端与后台页面来源不固定
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        // 后台需要携带 x-admin-pin 自定义头
        .allow_any_header()
        .max_age(3600)
}
