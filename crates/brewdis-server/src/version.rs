// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information for brewdis-server.

/// Format version info for display.
pub fn format_version_info() -> String {
	format!(
		"brewdis-server version: {}\n\
         Platform:               {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::ARCH,
		std::env::consts::OS,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_version_info_names_package() {
		let info = format_version_info();
		assert!(info.starts_with("brewdis-server version: "));
		assert!(info.contains(env!("CARGO_PKG_VERSION")));
	}
}
