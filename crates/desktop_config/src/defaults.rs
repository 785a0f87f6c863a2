use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Built-in document every loaded config is merged over.
pub static DEFAULT_CONFIG: Lazy<Value> = Lazy::new(|| {
    json!({
        "ids": {
            "brain_vm": 200,
            "guard_ct": 100
        },
        "network": {
            "bridge": "vmbr0",
            "host_ip": null,
            "gateway": null,
            "brain_ip": null,
            "guard_ip": null
        },
        "credentials": {
            "user": "adminuser",
            "key_path": "/root/oopuo_vault/oopuo_key"
        },
        "panes": {
            "header": "oopuo-desktop:0.0",
            "sidebar": "oopuo-desktop:0.1",
            "main": "oopuo-desktop:0.2",
            "minilog": "oopuo-desktop:0.3"
        },
        "views": {
            "header": "python3 /opt/oopuo/metrics.py",
            "dashboard": "python3 /opt/oopuo/dashboard.py",
            "logs": "python3 /opt/oopuo/logs.py",
            "timemachine": "python3 /opt/oopuo/timemachine.py",
            "settings": "python3 /opt/oopuo/settings.py",
            "navigator": "oopuo-navigator",
            "viewport": "oopuo-viewport"
        },
        "theme": {
            "primary": 51,
            "success": 46,
            "error": 196,
            "muted": 240,
            "accent": 198,
            "text": 255
        },
        "cloudflare": {
            "tunnel_installed": false,
            "tunnel_configured": false,
            "tunnel_name": null,
            "tunnel_id": null
        },
        "paths": {
            "runtime_dir": "/tmp"
        }
    })
});
