//! Doxygen XML samples shared by unit tests.

use std::fs;
use std::path::Path;

use refdoc_xml::{XmlNode, XmlParser};

pub(crate) const CLASS_REFID: &str = "classoneapi_1_1dal_1_1kmeans_1_1descriptor";
pub(crate) const NAMESPACE_REFID: &str = "namespaceoneapi_1_1dal_1_1kmeans";

pub(crate) const INDEX_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="classoneapi_1_1dal_1_1kmeans_1_1descriptor" kind="class"><name>oneapi::dal::kmeans::descriptor</name>
    <member refid="d_get_cc" kind="function"><name>get_cluster_count</name></member>
  </compound>
  <compound refid="namespaceoneapi_1_1dal_1_1kmeans" kind="namespace"><name>oneapi::dal::kmeans</name>
    <member refid="ns_train" kind="function"><name>train</name></member>
  </compound>
  <compound refid="kmeans_8hpp" kind="file"><name>kmeans.hpp</name></compound>
</doxygenindex>
"#;

pub(crate) const CLASS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="classoneapi_1_1dal_1_1kmeans_1_1descriptor" kind="class" language="C++" prot="public">
    <compoundname>oneapi::dal::kmeans::descriptor</compoundname>
    <templateparamlist>
      <param>
        <type>typename Float</type>
        <defval>float</defval>
      </param>
    </templateparamlist>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="d_ctor" prot="public" static="no">
        <type></type>
        <definition>oneapi::dal::kmeans::descriptor&lt; Float &gt;::descriptor</definition>
        <argsstring>(std::int64_t cluster_count=2)</argsstring>
        <name>descriptor</name>
        <param>
          <type>std::int64_t</type>
          <declname>cluster_count</declname>
          <defval>2</defval>
        </param>
        <briefdescription>
<para>Creates a new descriptor. </para>
        </briefdescription>
        <detaileddescription>
<para><parameterlist kind="param"><parameteritem>
<parameternamelist>
<parametername>cluster_count</parametername>
</parameternamelist>
<parameterdescription>
<para>The number of clusters $k$ </para>
</parameterdescription>
</parameteritem>
<parameteritem>
<parameternamelist>
<parametername>seed</parametername>
</parameternamelist>
<parameterdescription>
<para>Random seed </para>
</parameterdescription>
</parameteritem>
</parameterlist>
</para>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="12" column="5"/>
      </memberdef>
      <memberdef kind="function" id="d_get_cc" prot="public" static="no">
        <type>std::int64_t</type>
        <argsstring>() const</argsstring>
        <name>get_cluster_count</name>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
<para>The number of clusters $k$ used by <computeroutput>train</computeroutput>. <simplesect kind="invariant"><para><formula id="0">$cluster\_count &gt; 0$</formula> </para>
</simplesect>
<simplesect kind="remark"><para>default = 2 </para>
</simplesect>
</para>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="15" column="5"/>
      </memberdef>
      <memberdef kind="function" id="d_set_cc" prot="public" static="no">
        <type>descriptor &amp;</type>
        <argsstring>(std::int64_t value)</argsstring>
        <name>set_cluster_count</name>
        <param>
          <type>std::int64_t</type>
          <declname>value</declname>
        </param>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="16" column="5"/>
      </memberdef>
      <memberdef kind="function" id="d_get_mic" prot="public" static="no">
        <type>std::int64_t</type>
        <argsstring>() const</argsstring>
        <name>get_max_iteration_count</name>
        <briefdescription>
<para>The maximum number of iterations. </para>
        </briefdescription>
        <detaileddescription>
<para><simplesect kind="remark"><para>Must be positive </para>
<para>default = 100 </para>
</simplesect>
</para>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="18" column="5"/>
      </memberdef>
      <memberdef kind="function" id="d_set_tol" prot="public" static="no">
        <type>descriptor &amp;</type>
        <argsstring>(double value)</argsstring>
        <name>set_tolerance</name>
        <param>
          <type>double</type>
          <declname>value</declname>
        </param>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="20" column="5"/>
      </memberdef>
    </sectiondef>
    <sectiondef kind="private-func">
      <memberdef kind="function" id="d_impl" prot="private" static="no">
        <type>void</type>
        <argsstring>()</argsstring>
        <name>reset_impl</name>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
      </memberdef>
    </sectiondef>
    <briefdescription>
<para>K-Means algorithm descriptor. </para>
    </briefdescription>
    <detaileddescription>
<para><parameterlist kind="templateparam"><parameteritem>
<parameternamelist>
<parametername>Float</parametername>
</parameternamelist>
<parameterdescription>
<para>The floating-point type </para>
</parameterdescription>
</parameteritem>
</parameterlist>
</para>
    </detaileddescription>
    <location file="include/kmeans.hpp" line="9" column="1" bodyfile="include/kmeans.hpp" bodystart="9" bodyend="22"/>
  </compounddef>
</doxygen>
"#;

pub(crate) const NAMESPACE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="namespaceoneapi_1_1dal_1_1kmeans" kind="namespace" language="C++">
    <compoundname>oneapi::dal::kmeans</compoundname>
    <innerclass refid="classoneapi_1_1dal_1_1kmeans_1_1descriptor" prot="public">oneapi::dal::kmeans::descriptor</innerclass>
    <sectiondef kind="func">
      <memberdef kind="function" id="ns_train" prot="public" static="no">
        <type>train_result</type>
        <argsstring>(const descriptor &amp;desc, const table &amp;data)</argsstring>
        <name>train</name>
        <param>
          <type>const descriptor &amp;</type>
          <declname>desc</declname>
        </param>
        <param>
          <type>const <ref refid="classoneapi_1_1dal_1_1table" kindref="compound">table</ref> &amp;</type>
          <declname>data</declname>
        </param>
        <briefdescription>
<para>Runs the training. </para>
        </briefdescription>
        <detaileddescription>
<para><simplesect kind="pre"><para>data.has_data() </para>
</simplesect>
<simplesect kind="post"><para>result is valid </para>
</simplesect>
</para>
        </detaileddescription>
        <location file="include/kmeans.hpp" line="30" column="1"/>
      </memberdef>
    </sectiondef>
    <briefdescription>
    </briefdescription>
    <detaileddescription>
    </detaileddescription>
    <location file="include/kmeans.hpp" line="3" column="1"/>
  </compounddef>
</doxygen>
"#;

pub(crate) fn parse(xml: &str) -> XmlNode {
    XmlParser::new().parse(xml, "fixture").unwrap()
}

/// First `compounddef` of a compound file.
pub(crate) fn compound(xml: &str) -> XmlNode {
    parse(xml)
        .children
        .into_iter()
        .find(|c| c.tag == "compounddef")
        .unwrap()
}

/// Write the index and both compounds into `dir`.
pub(crate) fn write_xml_dir(dir: &Path) {
    fs::write(dir.join("index.xml"), INDEX_XML).unwrap();
    fs::write(dir.join(format!("{CLASS_REFID}.xml")), CLASS_XML).unwrap();
    fs::write(dir.join(format!("{NAMESPACE_REFID}.xml")), NAMESPACE_XML).unwrap();
}
