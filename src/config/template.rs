//! Configuration template written by `-gen-conf`.

use std::io::{self, Write};

use crate::config::schema::{NAME, VERSION};

/// The commented template, with every setting disabled.
pub fn config_template() -> String {
    format!(
        "# generated by: {NAME} {VERSION}
# for static file server

## list of allow remote IP address
#allow=127.0.0.1
#allow=192.168.1.x

## specify listen port
#port=:8080
# or
# accept localhost only
#port=127.0.0.1:8080

## specify root directory
#root=public
"
    )
}

/// Write the template to `out`.
pub fn write_config_template<W: Write>(mut out: W) -> io::Result<()> {
    out.write_all(config_template().as_bytes())?;
    out.flush()
}
